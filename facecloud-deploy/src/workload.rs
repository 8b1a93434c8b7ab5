//! Kubernetes workload
//!
//! The Deployment running the API container and, for the standard profile,
//! the LoadBalancer Service exposing it.

use std::collections::BTreeMap;

use facecloud_core::domain::stack::StackSettings;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::image::ImageSpec;
use crate::profile::Profile;

/// Port the API container listens on
pub const APP_PORT: i32 = 8000;

/// Port the load balancer exposes
pub const SERVICE_PORT: i32 = 80;

/// Labels selecting the application's pods
pub fn app_labels(profile: Profile, settings: &StackSettings) -> BTreeMap<String, String> {
    let app = match profile {
        Profile::Standard => settings.app_name(),
        Profile::Legacy => "fastapi".to_string(),
    };
    BTreeMap::from([("app".to_string(), app)])
}

/// Deployment running the API image
pub fn deployment(profile: Profile, settings: &StackSettings, image: &ImageSpec) -> Deployment {
    let labels = app_labels(profile, settings);

    let (name, replicas, container_name, ports) = match profile {
        Profile::Standard => ("app-deployment", 2, settings.app_name(), None),
        Profile::Legacy => (
            "fastapi-app",
            1,
            "fastapi".to_string(),
            Some(vec![ContainerPort {
                container_port: 80,
                ..Default::default()
            }]),
        ),
    };

    // the legacy deployment carries its labels on the object as well
    let object_labels = match profile {
        Profile::Standard => None,
        Profile::Legacy => Some(labels.clone()),
    };

    Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: object_labels,
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(replicas),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: container_name,
                        image: Some(image.image_name.clone()),
                        ports,
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// LoadBalancer Service in front of the deployment, if the profile has one
pub fn service(profile: Profile, settings: &StackSettings) -> Option<Service> {
    if profile == Profile::Legacy {
        return None;
    }

    Some(Service {
        metadata: ObjectMeta {
            name: Some("app-service".to_string()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(app_labels(profile, settings)),
            ports: Some(vec![ServicePort {
                port: SERVICE_PORT,
                target_port: Some(IntOrString::Int(APP_PORT)),
                ..Default::default()
            }]),
            type_: Some("LoadBalancer".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    })
}

/// First ingress IP the load balancer reported, if provisioned
pub fn load_balancer_ip(service: &Service) -> Option<String> {
    service
        .status
        .as_ref()?
        .load_balancer
        .as_ref()?
        .ingress
        .as_ref()?
        .first()?
        .ip
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{LoadBalancerIngress, LoadBalancerStatus, ServiceStatus};

    fn settings() -> StackSettings {
        StackSettings::new("my-project", "europe-west2-a", "dev")
    }

    #[test]
    fn test_standard_deployment() {
        let settings = settings();
        let image = ImageSpec::for_settings(&settings);
        let deployment = deployment(Profile::Standard, &settings, &image);

        let spec = deployment.spec.unwrap();
        assert_eq!(spec.replicas, Some(2));
        assert_eq!(
            spec.selector.match_labels,
            Some(app_labels(Profile::Standard, &settings))
        );

        let pod = spec.template.spec.unwrap();
        assert_eq!(pod.containers[0].name, "face-generation-app-dev");
        assert_eq!(
            pod.containers[0].image.as_deref(),
            Some("gcr.io/face-generation-app:dev")
        );
        assert!(pod.containers[0].ports.is_none());
    }

    #[test]
    fn test_legacy_deployment() {
        let settings = settings();
        let image = ImageSpec::for_settings(&settings);
        let deployment = deployment(Profile::Legacy, &settings, &image);

        assert_eq!(deployment.metadata.name.as_deref(), Some("fastapi-app"));
        assert_eq!(
            deployment.metadata.labels.unwrap().get("app").map(String::as_str),
            Some("fastapi")
        );

        let spec = deployment.spec.unwrap();
        assert_eq!(spec.replicas, Some(1));
        let pod = spec.template.spec.unwrap();
        assert_eq!(pod.containers[0].ports.as_ref().unwrap()[0].container_port, 80);
    }

    #[test]
    fn test_service_targets_app_port() {
        let service = service(Profile::Standard, &settings()).unwrap();
        let spec = service.spec.unwrap();

        assert_eq!(spec.type_.as_deref(), Some("LoadBalancer"));
        let ports = spec.ports.unwrap();
        assert_eq!(ports[0].port, 80);
        assert_eq!(ports[0].target_port, Some(IntOrString::Int(8000)));
        assert_eq!(spec.selector, Some(app_labels(Profile::Standard, &settings())));
    }

    #[test]
    fn test_legacy_has_no_service() {
        assert!(service(Profile::Legacy, &settings()).is_none());
    }

    #[test]
    fn test_load_balancer_ip() {
        let mut service = service(Profile::Standard, &settings()).unwrap();
        assert_eq!(load_balancer_ip(&service), None);

        service.status = Some(ServiceStatus {
            load_balancer: Some(LoadBalancerStatus {
                ingress: Some(vec![
                    LoadBalancerIngress {
                        ip: Some("35.1.2.3".to_string()),
                        ..Default::default()
                    },
                    LoadBalancerIngress {
                        ip: Some("35.9.9.9".to_string()),
                        ..Default::default()
                    },
                ]),
            }),
            ..Default::default()
        });
        assert_eq!(load_balancer_ip(&service), Some("35.1.2.3".to_string()));
    }
}
