//! Health Check API Handler

use axum::http::StatusCode;

/// GET /health
/// Liveness and readiness probe target. Answers as soon as the router is
/// serving; it does not touch the skin detector.
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
