//! Deployment profiles
//!
//! `Standard` is the single-node preemptible setup with the service exposed
//! through a load balancer. `Legacy` is the older three-node setup that only
//! runs the workload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeployError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Standard,
    Legacy,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Standard => write!(f, "standard"),
            Profile::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for Profile {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Profile::Standard),
            "legacy" => Ok(Profile::Legacy),
            _ => Err(DeployError::UnknownProfile(s.to_string())),
        }
    }
}
