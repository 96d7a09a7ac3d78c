//! HTTP adapter for image uploads.
//!
//! Accepts the raw image bytes as the request body with the MIME type in
//! the Content-Type header, stores the blob, and returns the URL the
//! client embeds in its message as an image reference.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use super::{ApiError, AppState};

/// Response for a stored upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// URL the image is served from.
    pub url: String,
}

/// POST /api/uploads - Store an image and return its URL
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    let url = state.images.store(&body, content_type).await?;
    Ok((StatusCode::CREATED, Json(UploadResponse { url })))
}

/// Create the uploads API router.
pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/uploads", post(upload_image))
}
