//! Manifest rendering
//!
//! Kubernetes objects rendered as YAML for `kubectl apply`.

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;

use crate::error::Result;

/// Objects making up the workload of a stack
#[derive(Debug, Clone)]
pub struct ManifestSet {
    pub deployment: Deployment,
    pub service: Option<Service>,
}

impl ManifestSet {
    /// One `(file name, YAML)` pair per object, deployment first
    pub fn files(&self) -> Result<Vec<(String, String)>> {
        let mut files = vec![(
            "deployment.yaml".to_string(),
            serde_yaml::to_string(&self.deployment)?,
        )];

        if let Some(service) = &self.service {
            files.push(("service.yaml".to_string(), serde_yaml::to_string(service)?));
        }

        Ok(files)
    }

    /// All objects in a single multi-document YAML stream
    pub fn render(&self) -> Result<String> {
        let docs = self
            .files()?
            .into_iter()
            .map(|(_, yaml)| format!("---\n{}", yaml))
            .collect();
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use crate::stack::declare;
    use facecloud_core::domain::stack::StackSettings;
    use serde::Deserialize;

    fn settings() -> StackSettings {
        StackSettings::new("my-project", "europe-west2-a", "dev")
    }

    #[test]
    fn test_render_standard() {
        let manifests = declare(settings(), Profile::Standard).unwrap().manifests();
        let yaml = manifests.render().unwrap();

        let docs: Vec<serde_yaml::Value> = serde_yaml::Deserializer::from_str(&yaml)
            .map(|doc| serde_yaml::Value::deserialize(doc).unwrap())
            .collect();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["apiVersion"], "apps/v1");
        assert_eq!(docs[0]["kind"], "Deployment");
        assert_eq!(docs[1]["apiVersion"], "v1");
        assert_eq!(docs[1]["kind"], "Service");
        assert_eq!(docs[1]["spec"]["type"], "LoadBalancer");
        assert_eq!(docs[1]["spec"]["ports"][0]["targetPort"], 8000);
    }

    #[test]
    fn test_legacy_files() {
        let manifests = declare(settings(), Profile::Legacy).unwrap().manifests();
        let files = manifests.files().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "deployment.yaml");

        let parsed: Deployment = serde_yaml::from_str(&files[0].1).unwrap();
        assert_eq!(parsed.metadata.name.as_deref(), Some("fastapi-app"));
    }
}
