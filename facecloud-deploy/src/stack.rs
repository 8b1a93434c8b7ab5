//! Stack declaration
//!
//! Ties the cluster, image and workload of one stack together. The image
//! name flows into the deployment; cluster outputs flow into the kubeconfig
//! once known (see [`crate::outputs`]).

use facecloud_core::domain::stack::StackSettings;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use serde::Serialize;

use crate::cluster::ClusterSpec;
use crate::error::Result;
use crate::image::ImageSpec;
use crate::manifests::ManifestSet;
use crate::profile::Profile;
use crate::workload;

/// Every resource declared for a stack
#[derive(Debug, Clone, Serialize)]
pub struct StackDeclaration {
    pub settings: StackSettings,
    pub profile: Profile,
    pub cluster: ClusterSpec,
    pub image: ImageSpec,
    pub deployment: Deployment,
    pub service: Option<Service>,
}

/// Declares all resources of a stack
pub fn declare(settings: StackSettings, profile: Profile) -> Result<StackDeclaration> {
    settings.validate()?;

    let cluster = ClusterSpec::for_profile(profile, &settings);
    let image = ImageSpec::for_settings(&settings);
    let deployment = workload::deployment(profile, &settings, &image);
    let service = workload::service(profile, &settings);

    tracing::info!(
        "Declared stack '{}' ({} profile) in {}/{}",
        settings.stack,
        profile,
        settings.project,
        settings.zone
    );

    Ok(StackDeclaration {
        settings,
        profile,
        cluster,
        image,
        deployment,
        service,
    })
}

impl StackDeclaration {
    pub fn manifests(&self) -> ManifestSet {
        ManifestSet {
            deployment: self.deployment.clone(),
            service: self.service.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployError;

    #[test]
    fn test_declare_wires_image_into_deployment() {
        let settings = StackSettings::new("my-project", "europe-west2-a", "staging");
        let stack = declare(settings, Profile::Standard).unwrap();

        let pod = stack.deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap();
        assert_eq!(pod.containers[0].image.as_deref(), Some(stack.image.image_name.as_str()));
        assert_eq!(stack.cluster.location, "europe-west2-a");
        assert!(stack.service.is_some());
    }

    #[test]
    fn test_declare_rejects_invalid_settings() {
        let settings = StackSettings::new("", "europe-west2-a", "dev");
        assert!(matches!(
            declare(settings, Profile::Standard),
            Err(DeployError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_declare_rejects_names_kubernetes_would_refuse() {
        for stack in ["dev-", "-dev", "a".repeat(60).as_str()] {
            let settings = StackSettings::new("my-project", "europe-west2-a", stack);
            assert!(
                declare(settings, Profile::Standard).is_err(),
                "stack '{}' was accepted",
                stack
            );
        }
    }
}
