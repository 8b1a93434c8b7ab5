//! Facecloud HTTP Client
//!
//! A small, type-safe HTTP client for the face segmentation API.
//!
//! # Example
//!
//! ```no_run
//! use facecloud_client::FaceCloudClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = FaceCloudClient::new("http://localhost:8000");
//!
//!     let image = std::fs::read("face.jpg")?;
//!     let colour = client.mean_colour("face.jpg", image).await?;
//!
//!     println!("Mean skin colour: {:?}", colour.results);
//!     Ok(())
//! }
//! ```

pub mod error;
mod face;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use facecloud_core::dto::colour::MeanColour;

use facecloud_core::dto::error::ErrorBody;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Path prefix of the face segmentation sub-application
pub const FACE_SEGMENTATION_PREFIX: &str = "/face_segmentation";

/// HTTP client for the Facecloud API
#[derive(Debug, Clone)]
pub struct FaceCloudClient {
    /// Base URL of the API (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl FaceCloudClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "http://localhost:8000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the health endpoint of the root application
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(())
    }

    /// Greeting of the root application
    pub async fn root(&self) -> Result<String> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response carrying a binary body
    async fn handle_bytes_response(&self, response: reqwest::Response) -> Result<Vec<u8>> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::debug!("API returned {}: {}", status, text);

        ClientError::api_error(status, error_message(&text))
    }
}

/// Extracts the `error` field of a JSON error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FaceCloudClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = FaceCloudClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_with_custom_client() {
        let client = FaceCloudClient::with_client("http://localhost:8000", Client::new());
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"error":"No skin detected in image"}"#),
            "No skin detected in image"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    fn http_response(status: u16, body: &'static str) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body(body)
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn test_error_from_json_body() {
        let response = http_response(422, r#"{"error":"No skin detected in image"}"#);

        match FaceCloudClient::error_from(response).await {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "No skin detected in image");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handle_response_rejects_error_status() {
        let client = FaceCloudClient::new("http://localhost:8000");
        let response = http_response(500, r#"{"error":"Internal server error"}"#);

        let err = client.handle_response::<String>(response).await.unwrap_err();
        assert!(err.is_server_error());
        assert!(err.to_string().contains("Internal server error"));

        let response = http_response(413, "payload too large");
        let err = client.handle_bytes_response(response).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::ApiError { status: 413, ref message } if message == "payload too large"
        ));
    }

    #[tokio::test]
    async fn test_handle_response_parses_success() {
        let client = FaceCloudClient::new("http://localhost:8000");
        let response = http_response(200, r#"{"results":[224.0,172.0,140.0]}"#);

        let colour: MeanColour = client.handle_response(response).await.unwrap();
        assert_eq!(colour.results, vec![224.0, 172.0, 140.0]);
    }
}
