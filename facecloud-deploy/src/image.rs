//! Container image declaration

use facecloud_core::domain::stack::StackSettings;
use serde::{Deserialize, Serialize};

/// Registry repository the image is pushed to
pub const REGISTRY_REPOSITORY: &str = "gcr.io/face-generation-app";

/// Image built from the repository's Dockerfile and pushed to the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub resource_name: String,
    /// Build context, relative to the deployment directory
    pub context: String,
    pub dockerfile: String,
    /// Fully qualified name including the tag
    pub image_name: String,
    pub skip_push: bool,
}

impl ImageSpec {
    /// Declares the image of a stack, tagged with the stack name
    pub fn for_settings(settings: &StackSettings) -> Self {
        Self {
            resource_name: settings.app_name(),
            context: "..".to_string(),
            dockerfile: "../Dockerfile".to_string(),
            image_name: format!("{}:{}", REGISTRY_REPOSITORY, settings.stack),
            skip_push: false,
        }
    }

    /// Image name without the tag
    pub fn base_image_name(&self) -> &str {
        self.split_tag().0
    }

    /// Tag of the image, `latest` when none is given
    pub fn tag(&self) -> &str {
        self.split_tag().1.unwrap_or("latest")
    }

    /// A `:` only starts a tag after the last `/` (registry ports use it too)
    fn split_tag(&self) -> (&str, Option<&str>) {
        let name_start = self.image_name.rfind('/').map_or(0, |i| i + 1);
        match self.image_name[name_start..].rfind(':') {
            Some(i) => {
                let at = name_start + i;
                (&self.image_name[..at], Some(&self.image_name[at + 1..]))
            }
            None => (&self.image_name, None),
        }
    }
}
