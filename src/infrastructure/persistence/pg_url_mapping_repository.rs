//! PostgreSQL implementation of the URL mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping, UrlType};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

/// Row as stored in `url_mappings`; `url_type` is kept as text.
#[derive(Debug, sqlx::FromRow)]
struct UrlMappingRow {
    id: i64,
    original_url: String,
    short_url: String,
    url_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UrlMappingRow> for UrlMapping {
    type Error = AppError;

    fn try_from(row: UrlMappingRow) -> Result<Self, Self::Error> {
        let url_type = row
            .url_type
            .parse::<UrlType>()
            .map_err(|e| AppError::internal(format!("Corrupt row {}: {}", row.id, e)))?;

        Ok(UrlMapping {
            id: row.id,
            original_url: row.original_url,
            short_url: row.short_url,
            url_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Short code uniqueness is enforced by the `url_mappings_short_url_key`
/// constraint; violations surface as [`AppError::Conflict`].
pub struct PgUrlMappingRepository {
    pool: Arc<PgPool>,
}

impl PgUrlMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlMappingRepository for PgUrlMappingRepository {
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            SELECT id, original_url, short_url, url_type, created_at, updated_at
            FROM url_mappings
            WHERE short_url = $1
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(UrlMapping::try_from).transpose()
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            SELECT id, original_url, short_url, url_type, created_at, updated_at
            FROM url_mappings
            WHERE original_url = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(UrlMapping::try_from).transpose()
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            INSERT INTO url_mappings (original_url, short_url, url_type)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_url, url_type, created_at, updated_at
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_url)
        .bind(new_mapping.url_type.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        UrlMapping::try_from(row)
    }

    async fn update(&self, mapping: UrlMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(
            r#"
            UPDATE url_mappings
            SET original_url = $2,
                short_url = $3,
                url_type = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, original_url, short_url, url_type, created_at, updated_at
            "#,
        )
        .bind(mapping.id)
        .bind(&mapping.original_url)
        .bind(&mapping.short_url)
        .bind(mapping.url_type.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found(format!("No URL mapping with id {}", mapping.id)))?;

        UrlMapping::try_from(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
