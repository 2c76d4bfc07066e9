//! Handler for the short URL generation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::generate::{GenerateRequest, GenerateResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) short URL for an original URL.
///
/// # Endpoint
///
/// `POST /generate`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/some/long/path",
///   "short_url": "my-link",   // optional
///   "url_type": "CUSTOM"      // optional, RANDOM by default
/// }
/// ```
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// {
///   "short_url": "http://localhost:8000/url-shortener/api/v1/my-link",
///   "original_url": "https://example.com/some/long/path",
///   "is_short_url_exists": false,
///   "created_at": "2024-01-15T10:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 with error code 1000 for malformed input and 1003 when the
/// custom code is taken. Returns 500 with error code 1001 otherwise.
pub async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    payload.validate()?;

    let outcome = state
        .shortening_service
        .shorten(
            &payload.original_url,
            payload.short_url.as_deref(),
            payload.url_type,
        )
        .await?;

    tracing::debug!(
        code = %outcome.code,
        already_existed = outcome.already_existed,
        "Short URL generated"
    );

    Ok((StatusCode::CREATED, Json(outcome.into())))
}
