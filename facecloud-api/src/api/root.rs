//! Root API Handler

use axum::Json;

/// GET /
/// Greeting of the root application
pub async fn root() -> Json<&'static str> {
    Json("Main API")
}
