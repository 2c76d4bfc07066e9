//! CORS policy for browser clients.

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Builds a CORS layer allowing the given origins.
///
/// Returns `None` when no origin is configured, in which case no CORS headers
/// are emitted at all. Origins that are not valid header values are skipped.
pub fn layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim_end_matches('/')) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
