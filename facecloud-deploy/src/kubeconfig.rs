//! Kubeconfig rendering
//!
//! Produces a client configuration with a single cluster, context and user.
//! Two credential styles are supported: an exec plugin that shells out to
//! `gcloud`, and the older `gcp` auth provider with the cluster CA embedded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, Result};

/// API version of the exec credential plugin protocol
pub const EXEC_API_VERSION: &str = "client.authentication.k8s.io/v1beta1";

/// How the user authenticates against the API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KubeAuth {
    /// Credentials fetched by running `gcloud`
    Exec { project: String, zone: String },
    /// `gcp` auth provider; `ca_data` is the base64 cluster CA certificate
    GcpAuthProvider { ca_data: String },
}

impl KubeAuth {
    /// Name shared by the cluster, context and user entries
    pub fn entry_name(&self, cluster_name: &str) -> String {
        match self {
            KubeAuth::Exec { .. } => format!("gke_{}", cluster_name),
            KubeAuth::GcpAuthProvider { .. } => cluster_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kubeconfig {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub clusters: Vec<NamedCluster>,
    pub contexts: Vec<NamedContext>,
    #[serde(rename = "current-context")]
    pub current_context: String,
    pub kind: String,
    pub preferences: BTreeMap<String, String>,
    pub users: Vec<NamedUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCluster {
    pub cluster: ClusterEntry,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterEntry {
    #[serde(
        rename = "certificate-authority-data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub certificate_authority_data: Option<String>,
    pub server: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    pub context: ContextEntry,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub cluster: String,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedUser {
    pub name: String,
    pub user: UserEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecConfig>,
    #[serde(
        rename = "auth-provider",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_provider: Option<AuthProvider>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecConfig {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub command: String,
    pub args: Vec<String>,
    #[serde(rename = "provideClusterInfo")]
    pub provide_cluster_info: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthProvider {
    pub name: String,
}

/// Builds the kubeconfig document for a cluster
///
/// `endpoint` is the API server address, bare or with an `https://` scheme;
/// it is always served over HTTPS.
pub fn build(cluster_name: &str, endpoint: &str, auth: &KubeAuth) -> Result<Kubeconfig> {
    if cluster_name.trim().is_empty() {
        return Err(DeployError::Missing("cluster name"));
    }
    if endpoint.trim().is_empty() {
        return Err(DeployError::Missing("cluster endpoint"));
    }

    let host = server_host(endpoint.trim())?;
    let name = auth.entry_name(cluster_name);

    let (certificate_authority_data, user) = match auth {
        KubeAuth::Exec { project, zone } => {
            let args = [
                "container",
                "clusters",
                "get-credentials",
                cluster_name,
                "--project",
                project.as_str(),
                "--zone",
                zone.as_str(),
            ];
            let exec = ExecConfig {
                api_version: EXEC_API_VERSION.to_string(),
                command: "gcloud".to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
                provide_cluster_info: true,
            };
            (
                None,
                UserEntry {
                    exec: Some(exec),
                    auth_provider: None,
                },
            )
        }
        KubeAuth::GcpAuthProvider { ca_data } => (
            Some(ca_data.clone()),
            UserEntry {
                exec: None,
                auth_provider: Some(AuthProvider {
                    name: "gcp".to_string(),
                }),
            },
        ),
    };

    Ok(Kubeconfig {
        api_version: "v1".to_string(),
        clusters: vec![NamedCluster {
            cluster: ClusterEntry {
                certificate_authority_data,
                server: format!("https://{}", host),
            },
            name: name.clone(),
        }],
        contexts: vec![NamedContext {
            context: ContextEntry {
                cluster: name.clone(),
                user: name.clone(),
            },
            name: name.clone(),
        }],
        current_context: name.clone(),
        kind: "Config".to_string(),
        preferences: BTreeMap::new(),
        users: vec![NamedUser { name, user }],
    })
}

/// Host part of an endpoint, rejecting any scheme other than `https`
fn server_host(endpoint: &str) -> Result<&str> {
    match endpoint.split_once("://") {
        None => Ok(endpoint),
        Some((scheme, host)) if scheme.eq_ignore_ascii_case("https") && !host.is_empty() => {
            Ok(host)
        }
        Some(_) => Err(DeployError::InsecureEndpoint(endpoint.to_string())),
    }
}

/// Renders the kubeconfig document as YAML
pub fn render(cluster_name: &str, endpoint: &str, auth: &KubeAuth) -> Result<String> {
    let kubeconfig = build(cluster_name, endpoint, auth)?;
    tracing::debug!("Rendering kubeconfig for context {}", kubeconfig.current_context);
    Ok(serde_yaml::to_string(&kubeconfig)?)
}
