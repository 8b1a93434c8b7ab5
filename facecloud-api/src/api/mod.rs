//! API Module
//!
//! HTTP API layer for the service.
//! The root application owns `/` and `/health`; the face segmentation
//! sub-application is built separately and mounted under its prefix.

pub mod error;
pub mod face_segmentation;
pub mod health;
pub mod root;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use facecloud_vision::SkinDetector;
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<dyn SkinDetector>,
}

impl AppState {
    pub fn new(detector: Arc<dyn SkinDetector>) -> Self {
        Self { detector }
    }
}

/// Create the root application with all sub-applications mounted
pub fn create_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/", get(root::root))
        // Health check
        .route("/health", get(health::health_check));

    face_segmentation::mount(router)
        // Add state and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use axum::http::StatusCode;
    use facecloud_vision::YcbcrSkinDetector;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(
            AppState::new(Arc::new(YcbcrSkinDetector::new())),
            &Config::default(),
        )
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let response = app().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!("Main API"));
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"OK");
    }

    #[tokio::test]
    async fn test_sub_application_is_mounted() {
        for uri in ["/face_segmentation", "/face_segmentation/"] {
            let response = app().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
            assert_eq!(
                body_json(response).await,
                serde_json::json!("Face Segmentation API")
            );
        }
    }

    #[tokio::test]
    async fn test_sub_routes_are_not_on_root() {
        let request = multipart_request("/get_mean_colour/", "file", b"");
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_limit() {
        let config = Config {
            max_upload_bytes: 64,
            ..Config::default()
        };
        let app = create_router(AppState::new(Arc::new(YcbcrSkinDetector::new())), &config);

        let request =
            multipart_request("/face_segmentation/get_mean_colour/", "file", &[0u8; 4096]);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
