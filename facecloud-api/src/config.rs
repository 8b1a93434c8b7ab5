//! API configuration
//!
//! Bind address and upload limits, read from the environment.

/// Default bind address; the Kubernetes service targets port 8000
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default upload limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind_addr: String,

    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - API_BIND_ADDR (optional, default: 0.0.0.0:8000)
    /// - MAX_UPLOAD_BYTES (optional, default: 10485760)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("API_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(value) => value
                .parse::<usize>()
                .map_err(|e| anyhow::anyhow!("MAX_UPLOAD_BYTES is not a number: {}", e))?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            bind_addr,
            max_upload_bytes,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!("bind_addr must be a socket address, got '{}'", self.bind_addr);
        }

        if self.max_upload_bytes == 0 {
            anyhow::bail!("max_upload_bytes must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.bind_addr = "localhost".to_string();
        assert!(config.validate().is_err());

        config.bind_addr = "127.0.0.1:9000".to_string();
        assert!(config.validate().is_ok());

        config.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }
}
