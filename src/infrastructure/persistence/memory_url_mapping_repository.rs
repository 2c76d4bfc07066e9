//! In-process implementation of the URL mapping repository.
//!
//! Mirrors the PostgreSQL semantics: ids increase monotonically, `short_url`
//! is unique, and lookups by original URL return the lowest id.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    // Kept in id order.
    mappings: Vec<UrlMapping>,
}

/// URL mapping store held in memory.
#[derive(Default)]
pub struct MemoryUrlMappingRepository {
    inner: RwLock<Inner>,
}

impl MemoryUrlMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.inner.read().await.mappings.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UrlMappingRepository for MemoryUrlMappingRepository {
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .mappings
            .iter()
            .find(|m| m.short_url == short_url)
            .cloned())
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .mappings
            .iter()
            .find(|m| m.original_url == original_url)
            .cloned())
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mut inner = self.inner.write().await;

        if inner
            .mappings
            .iter()
            .any(|m| m.short_url == new_mapping.short_url)
        {
            return Err(AppError::conflict("Custom URL already exists"));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let mapping = UrlMapping {
            id: inner.next_id,
            original_url: new_mapping.original_url,
            short_url: new_mapping.short_url,
            url_type: new_mapping.url_type,
            created_at: now,
            updated_at: now,
        };
        inner.mappings.push(mapping.clone());

        Ok(mapping)
    }

    async fn update(&self, mapping: UrlMapping) -> Result<UrlMapping, AppError> {
        let mut inner = self.inner.write().await;

        if inner
            .mappings
            .iter()
            .any(|m| m.id != mapping.id && m.short_url == mapping.short_url)
        {
            return Err(AppError::conflict("Custom URL already exists"));
        }

        let stored = inner
            .mappings
            .iter_mut()
            .find(|m| m.id == mapping.id)
            .ok_or_else(|| AppError::not_found(format!("No URL mapping with id {}", mapping.id)))?;

        stored.original_url = mapping.original_url;
        stored.short_url = mapping.short_url;
        stored.url_type = mapping.url_type;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
