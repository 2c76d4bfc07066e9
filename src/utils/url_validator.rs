//! Validation of URLs submitted for shortening.
//!
//! URLs are checked but never rewritten: the mapping stores exactly what the
//! caller sent, so resubmitting the same string finds the same mapping.

use url::Url;

/// Upper bound matching the `original_url` column.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur while validating a URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// # Security
///
/// Rejects potentially dangerous schemes like `javascript:`, `data:` and `file:`.
///
/// # Errors
///
/// Returns [`UrlValidationError`] describing the first violated rule.
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}
