//! Top-level router configuration.
//!
//! # Route Structure
//!
//! Everything lives under the configured API prefix
//! (default `/url-shortener/api/v1`), see [`crate::api::routes::routes`].
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Compression** - gzip response bodies
//! - **CORS** - Only when origins are configured
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
///
/// An empty `api_prefix` mounts the routes at the root.
pub fn router(state: AppState, api_prefix: &str, cors_origins: &[String]) -> Router {
    let api_router = api::routes::routes();

    let mut router = if api_prefix.is_empty() {
        Router::new().merge(api_router)
    } else {
        Router::new().nest(api_prefix, api_router)
    }
    .with_state(state)
    .layer(CompressionLayer::new().gzip(true));

    if let Some(cors_layer) = cors::layer(cors_origins) {
        router = router.layer(cors_layer);
    }

    router.layer(tracing::layer())
}

/// Constructs the application service, trimming trailing slashes before routing.
pub fn app_router(
    state: AppState,
    api_prefix: &str,
    cors_origins: &[String],
) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, api_prefix, cors_origins))
}
