//! Short code resolution for redirects.

use std::sync::Arc;

use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

/// Resolves short codes to their original URLs. Read-only.
pub struct RedirectService {
    repository: Arc<dyn UrlMappingRepository>,
}

impl RedirectService {
    pub fn new(repository: Arc<dyn UrlMappingRepository>) -> Self {
        Self { repository }
    }

    /// Returns the original URL stored for `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping uses the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        self.repository
            .find_by_short_url(short_code)
            .await?
            .map(|mapping| mapping.original_url)
            .ok_or_else(|| AppError::not_found("Short URL not found"))
    }
}
