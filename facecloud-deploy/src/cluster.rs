//! Managed cluster declaration

use facecloud_core::domain::stack::StackSettings;
use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// Resource name of the cluster in the provisioning engine
pub const CLUSTER_RESOURCE_NAME: &str = "gke-cluster";

/// Scopes granted to legacy nodes
pub const LEGACY_OAUTH_SCOPES: [&str; 4] = [
    "https://www.googleapis.com/auth/compute",
    "https://www.googleapis.com/auth/devstorage.read_only",
    "https://www.googleapis.com/auth/logging.write",
    "https://www.googleapis.com/auth/monitoring",
];

/// GKE cluster to provision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSpec {
    pub resource_name: String,
    pub project: String,
    /// Zone the cluster is created in
    pub location: String,
    pub initial_node_count: u32,
    pub node_version: String,
    pub min_master_version: String,
    pub node_config: NodeConfig,
}

/// Configuration of the default node pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub machine_type: String,
    pub preemptible: bool,
    /// Provider default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub oauth_scopes: Vec<String>,
}

impl ClusterSpec {
    /// Declares the cluster for a profile
    pub fn for_profile(profile: Profile, settings: &StackSettings) -> Self {
        let (initial_node_count, node_config) = match profile {
            Profile::Standard => (
                1,
                NodeConfig {
                    machine_type: "e2-micro".to_string(),
                    preemptible: true,
                    disk_size_gb: Some(10),
                    oauth_scopes: Vec::new(),
                },
            ),
            Profile::Legacy => (
                3,
                NodeConfig {
                    machine_type: "n1-standard-1".to_string(),
                    preemptible: false,
                    disk_size_gb: None,
                    oauth_scopes: LEGACY_OAUTH_SCOPES.iter().map(|s| s.to_string()).collect(),
                },
            ),
        };

        Self {
            resource_name: CLUSTER_RESOURCE_NAME.to_string(),
            project: settings.project.clone(),
            location: settings.zone.clone(),
            initial_node_count,
            node_version: "latest".to_string(),
            min_master_version: "latest".to_string(),
            node_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> StackSettings {
        StackSettings::new("my-project", "europe-west2-a", "dev")
    }

    #[test]
    fn test_standard_cluster() {
        let cluster = ClusterSpec::for_profile(Profile::Standard, &settings());
        assert_eq!(cluster.initial_node_count, 1);
        assert_eq!(cluster.project, "my-project");
        assert_eq!(cluster.location, "europe-west2-a");
        assert!(cluster.node_config.preemptible);
        assert_eq!(cluster.node_config.machine_type, "e2-micro");
        assert_eq!(cluster.node_config.disk_size_gb, Some(10));
    }

    #[test]
    fn test_legacy_cluster() {
        let cluster = ClusterSpec::for_profile(Profile::Legacy, &settings());
        assert_eq!(cluster.initial_node_count, 3);
        assert_eq!(cluster.node_config.machine_type, "n1-standard-1");
        assert_eq!(cluster.node_config.oauth_scopes.len(), 4);

        let json = serde_json::to_value(&cluster).unwrap();
        assert!(json["node_config"].get("disk_size_gb").is_none());
    }
}
