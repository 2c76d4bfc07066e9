//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// Answers with `307 Temporary Redirect` so clients keep the request method.
/// The stored URL is left as submitted; the `Location` header carries its
/// serialized form (punycode host, percent-encoded path and query).
///
/// # Errors
///
/// Returns 404 Not Found (error code 1002) if the short code doesn't exist.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = state.redirect_service.resolve(&short_code).await?;

    let location = location_for(&original_url)?;

    debug!("Redirecting {} -> {}", short_code, location);

    Ok(Redirect::temporary(location.as_str()))
}

/// Serializes a stored URL into a valid URI for the `Location` header.
fn location_for(original_url: &str) -> Result<Url, AppError> {
    Url::parse(original_url).map_err(|e| {
        AppError::internal(format!(
            "Stored URL '{}' cannot be parsed: {}",
            original_url, e
        ))
    })
}
