//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for URL mappings.
///
/// Implementations must enforce uniqueness of `short_url` themselves; the
/// services' availability checks are advisory only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryUrlMappingRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMappingRepository: Send + Sync {
    /// Finds a mapping by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its original URL.
    ///
    /// Returns at most one mapping; if several exist the one with the lowest id
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Persists a new mapping, assigning its id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `short_url` is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Rewrites the mutable fields of an existing mapping and refreshes
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new `short_url` is held by another mapping.
    /// Returns [`AppError::NotFound`] if no mapping has `mapping.id`.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, mapping: UrlMapping) -> Result<UrlMapping, AppError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
