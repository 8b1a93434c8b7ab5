//! Face Segmentation API
//!
//! Sub-application wrapping the skin detector. It is a self-contained
//! router; `mount` attaches it to a parent under `/face_segmentation`.
//!
//! Uploads are multipart forms carrying the image in a part named `file`.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use facecloud_core::dto::colour::MeanColour;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// Path prefix the sub-application is mounted under
pub const PREFIX: &str = "/face_segmentation";

/// Name of the multipart part carrying the image
pub const FILE_FIELD: &str = "file";

/// Create the face segmentation sub-application
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/get_mean_colour/", post(get_mean_colour))
        .route("/get_segmented_image/", post(get_segmented_image))
}

/// Mount the sub-application on `parent` under [`PREFIX`]
///
/// A nested `/` only answers the bare prefix, so the trailing-slash form of
/// the sub-application root is registered on the parent as well.
pub fn mount(parent: Router<AppState>) -> Router<AppState> {
    parent
        .route(&format!("{}/", PREFIX), get(root))
        .nest(PREFIX, router())
}

/// GET /face_segmentation/
/// Greeting of the sub-application
pub async fn root() -> Json<&'static str> {
    Json("Face Segmentation API")
}

/// POST /face_segmentation/get_mean_colour/
/// Mean colour of the skin in the uploaded image
pub async fn get_mean_colour(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<MeanColour>> {
    let bytes = read_file(multipart?).await?;

    let detector = state.detector.clone();
    let rgb = tokio::task::spawn_blocking(move || detector.mean_colour(&bytes)).await??;

    tracing::debug!("Mean colour: {:?}", rgb);

    Ok(Json(MeanColour::from_rgb(rgb)))
}

/// POST /face_segmentation/get_segmented_image/
/// Uploaded image with everything but skin blacked out, as PNG
pub async fn get_segmented_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Response> {
    let bytes = read_file(multipart?).await?;

    let detector = state.detector.clone();
    let png = tokio::task::spawn_blocking(move || detector.segmented_image(&bytes)).await??;

    tracing::debug!("Segmented image: {} bytes", png.len());

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// Reads the `file` part of the upload, skipping any other parts
async fn read_file(mut multipart: Multipart) -> ApiResult<Bytes> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("<unnamed>").to_string();
        let bytes = field.bytes().await?;

        tracing::info!("Received upload '{}' ({} bytes)", file_name, bytes.len());

        return Ok(bytes);
    }

    Err(ApiError::Unprocessable(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}
