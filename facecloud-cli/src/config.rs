//! Configuration module
//!
//! Handles CLI configuration shared by all commands.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the face segmentation API
    pub api_url: String,
}
