//! API route configuration.

use crate::api::handlers::{generate_handler, health_handler, redirect_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, relative to the configured prefix.
///
/// # Endpoints
///
/// - `POST /generate`      - Create or fetch a short URL
/// - `GET  /health`        - Health check
/// - `GET  /{short_code}`  - Redirect to the original URL
///
/// Static segments win over the `{short_code}` capture, which is why
/// `generate` and `health` are reserved custom codes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_handler))
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
}
