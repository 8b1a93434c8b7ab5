//! Error types for deployment rendering

use facecloud_core::domain::stack::StackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeployError>;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Invalid stack settings: {0}")]
    InvalidSettings(#[from] StackError),

    #[error("Unknown profile '{0}' (expected 'standard' or 'legacy')")]
    UnknownProfile(String),

    /// A value needed to render an artifact is missing
    #[error("Missing {0}")]
    Missing(&'static str),

    #[error("Cluster endpoint '{0}' must be a bare host or an https:// URL")]
    InsecureEndpoint(String),

    #[error("Failed to serialize YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}
