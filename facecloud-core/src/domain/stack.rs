//! Stack domain types
//!
//! A stack is one named instance of the deployment (e.g. `dev`, `prod`).
//! Its name is baked into resource names and the container image tag.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of every application resource name
pub const APP_NAME_PREFIX: &str = "face-generation-app";

/// Longest stack name keeping `{APP_NAME_PREFIX}-{stack}` a DNS-1123 label
pub const MAX_STACK_LEN: usize = 63 - APP_NAME_PREFIX.len() - 1;

/// Settings read from outside the declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSettings {
    /// Cloud project identifier
    pub project: String,
    /// Deployment zone (e.g. `europe-west2-a`)
    pub zone: String,
    /// Stack name
    pub stack: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("stack name '{0}' may only contain lowercase letters, digits and '-'")]
    InvalidStackName(String),

    #[error("stack name '{0}' must start and end with a lowercase letter or digit")]
    StackNameBoundary(String),

    #[error("stack name '{name}' is longer than {max} characters")]
    StackNameTooLong { name: String, max: usize },
}

impl StackSettings {
    pub fn new(
        project: impl Into<String>,
        zone: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            zone: zone.into(),
            stack: stack.into(),
        }
    }

    /// Name of the application, used for labels and the image resource
    pub fn app_name(&self) -> String {
        format!("{}-{}", APP_NAME_PREFIX, self.stack)
    }

    /// Validates the settings
    pub fn validate(&self) -> Result<(), StackError> {
        if self.project.trim().is_empty() {
            return Err(StackError::Empty("project"));
        }

        if self.zone.trim().is_empty() {
            return Err(StackError::Empty("zone"));
        }

        if self.stack.is_empty() {
            return Err(StackError::Empty("stack"));
        }

        let valid = self
            .stack
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(StackError::InvalidStackName(self.stack.clone()));
        }

        if self.stack.starts_with('-') || self.stack.ends_with('-') {
            return Err(StackError::StackNameBoundary(self.stack.clone()));
        }

        if self.stack.len() > MAX_STACK_LEN {
            return Err(StackError::StackNameTooLong {
                name: self.stack.clone(),
                max: MAX_STACK_LEN,
            });
        }

        Ok(())
    }
}

/// Named outputs of a rendered stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackOutputs {
    pub cluster_name: String,
    pub kubeconfig: String,
    pub base_image_name: String,
    pub registry_image_name: String,
    pub registry_image_tag: String,
    /// Unknown until the load balancer has been provisioned
    pub app_service_ip: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_name_includes_stack() {
        let settings = StackSettings::new("my-project", "europe-west2-a", "dev");
        assert_eq!(settings.app_name(), "face-generation-app-dev");
    }

    #[test]
    fn test_validate() {
        let mut settings = StackSettings::new("my-project", "europe-west2-a", "dev");
        assert!(settings.validate().is_ok());

        settings.project = "  ".to_string();
        assert_eq!(settings.validate(), Err(StackError::Empty("project")));

        settings.project = "my-project".to_string();
        settings.zone = String::new();
        assert_eq!(settings.validate(), Err(StackError::Empty("zone")));

        settings.zone = "europe-west2-a".to_string();
        settings.stack = "Dev_1".to_string();
        assert!(matches!(
            settings.validate(),
            Err(StackError::InvalidStackName(_))
        ));

        settings.stack = "dev-".to_string();
        assert_eq!(
            settings.validate(),
            Err(StackError::StackNameBoundary("dev-".to_string()))
        );

        settings.stack = "-dev".to_string();
        assert_eq!(
            settings.validate(),
            Err(StackError::StackNameBoundary("-dev".to_string()))
        );
    }

    #[test]
    fn test_stack_name_length() {
        assert_eq!(MAX_STACK_LEN, 43);

        let mut settings = StackSettings::new("my-project", "europe-west2-a", "a".repeat(43));
        assert!(settings.validate().is_ok());
        assert_eq!(settings.app_name().len(), 63);

        settings.stack = "a".repeat(60);
        assert!(matches!(
            settings.validate(),
            Err(StackError::StackNameTooLong { max: 43, .. })
        ));
    }
}
