//! Stack outputs
//!
//! Collects the named outputs once the cluster exists. The cluster name and
//! endpoint are assigned by the provider, so they come from outside.

use facecloud_core::domain::stack::StackOutputs;
use k8s_openapi::api::core::v1::Service;

use crate::error::{DeployError, Result};
use crate::kubeconfig::{self, KubeAuth};
use crate::profile::Profile;
use crate::stack::StackDeclaration;
use crate::workload;

/// Cluster attributes reported by the provider
#[derive(Debug, Clone)]
pub struct ProvisionedCluster {
    pub name: String,
    pub endpoint: String,
    /// Base64 CA certificate, needed by the legacy kubeconfig
    pub ca_data: Option<String>,
}

/// Credential style used for a profile's kubeconfig
pub fn kube_auth(stack: &StackDeclaration, cluster: &ProvisionedCluster) -> Result<KubeAuth> {
    match stack.profile {
        Profile::Standard => Ok(KubeAuth::Exec {
            project: stack.settings.project.clone(),
            zone: stack.settings.zone.clone(),
        }),
        Profile::Legacy => {
            let ca_data = cluster
                .ca_data
                .clone()
                .ok_or(DeployError::Missing("cluster CA certificate"))?;
            Ok(KubeAuth::GcpAuthProvider { ca_data })
        }
    }
}

/// Collects the outputs of a stack
///
/// `live_service` is the Service as read back from the cluster; its status
/// carries the load balancer address.
pub fn collect(
    stack: &StackDeclaration,
    cluster: &ProvisionedCluster,
    live_service: Option<&Service>,
) -> Result<StackOutputs> {
    let auth = kube_auth(stack, cluster)?;
    let kubeconfig = kubeconfig::render(&cluster.name, &cluster.endpoint, &auth)?;

    let app_service_ip = live_service.and_then(workload::load_balancer_ip);
    if stack.service.is_some() && app_service_ip.is_none() {
        tracing::warn!("Load balancer has no ingress IP yet");
    }

    Ok(StackOutputs {
        cluster_name: cluster.name.clone(),
        kubeconfig,
        base_image_name: stack.image.base_image_name().to_string(),
        registry_image_name: stack.image.image_name.clone(),
        registry_image_tag: stack.image.tag().to_string(),
        app_service_ip,
    })
}
