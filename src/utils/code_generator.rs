//! Short code generation and validation utilities.
//!
//! Random codes are drawn uniformly from the 62-character alphanumeric alphabet
//! (`a-z`, `A-Z`, `0-9`). Uniqueness is not guaranteed here; callers check the
//! store for collisions.

use rand::{Rng, distr::Alphanumeric};

use crate::error::AppError;

/// Reserved codes that cannot be used as custom short links.
///
/// These match routes living next to `GET /{short_code}`.
pub const RESERVED_CODES: &[&str] = &["generate", "health"];

/// Source of candidate short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a candidate code of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Thread-local RNG backed generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        generate_code(length)
    }
}

/// Generates a random alphanumeric code of `length` characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(10);
/// assert_eq!(code.len(), 10);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Validates a caller-supplied custom short code.
///
/// # Rules
///
/// - Length: 1 to `max_length` characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route word
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str, max_length: usize) -> Result<(), AppError> {
    if code.is_empty() || code.len() > max_length {
        return Err(AppError::bad_request(format!(
            "Custom short URL must be 1-{} characters",
            max_length
        )));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom short URL can only contain letters, digits, hyphens and underscores",
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request("This short URL is reserved"));
    }

    Ok(())
}
