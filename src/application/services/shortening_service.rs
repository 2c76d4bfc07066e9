//! Short link creation: idempotent lookup-or-create with custom code support.

use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, ShortenOutcome, UrlMapping, UrlType};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, validate_custom_code};
use crate::utils::url_validator::validate_url;

pub const DEFAULT_CODE_LENGTH: usize = 10;
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 1000;

/// Tunables for [`ShorteningService`].
#[derive(Debug, Clone)]
pub struct ShortenerSettings {
    /// Length of generated codes and upper bound for custom codes.
    pub code_length: usize,
    /// Generated candidates tried before giving up.
    pub max_code_attempts: usize,
    /// Prefix of every returned short URL, e.g. `https://s.example.com/api/v1`.
    pub base_url: String,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
            base_url: "http://localhost:8000/url-shortener/api/v1".to_string(),
        }
    }
}

/// Service for creating short links.
///
/// A given original URL maps to a single short code: resubmitting it returns
/// the existing mapping, and resubmitting it with a different custom code moves
/// the mapping to that code.
pub struct ShorteningService {
    repository: Arc<dyn UrlMappingRepository>,
    generator: Arc<dyn CodeGenerator>,
    settings: ShortenerSettings,
}

impl ShorteningService {
    pub fn new(
        repository: Arc<dyn UrlMappingRepository>,
        generator: Arc<dyn CodeGenerator>,
        settings: ShortenerSettings,
    ) -> Self {
        Self {
            repository,
            generator,
            settings,
        }
    }

    /// Shortens `original_url`, reusing an existing mapping when there is one.
    ///
    /// A custom code is only honoured when `url_type` is [`UrlType::Custom`];
    /// otherwise it is ignored and a random code is generated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or the custom code is malformed.
    /// Returns [`AppError::Conflict`] if the custom code is held by another mapping.
    /// Returns [`AppError::Internal`] on storage errors or when no free code
    /// was found within `max_code_attempts`.
    pub async fn shorten(
        &self,
        original_url: &str,
        custom_code: Option<&str>,
        url_type: UrlType,
    ) -> Result<ShortenOutcome, AppError> {
        let original_url = original_url.trim();
        validate_url(original_url).map_err(|e| AppError::bad_request(e.to_string()))?;

        let requested_code = match (custom_code, url_type) {
            (Some(code), UrlType::Custom) => {
                validate_custom_code(code, self.settings.code_length)?;
                Some(code)
            }
            _ => None,
        };

        let (mapping, already_existed) =
            match self.repository.find_by_original_url(original_url).await? {
                Some(existing) => (self.reuse_existing(existing, requested_code).await?, true),
                None => (self.create_mapping(original_url, requested_code).await?, false),
            };

        Ok(ShortenOutcome {
            short_url: self.short_url_for(&mapping.short_url),
            code: mapping.short_url,
            original_url: mapping.original_url,
            already_existed,
            created_at: mapping.created_at,
        })
    }

    /// Builds the public redirect URL for a code.
    pub fn short_url_for(&self, code: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), code)
    }

    /// Returns `existing` untouched unless a different custom code was requested.
    async fn reuse_existing(
        &self,
        existing: UrlMapping,
        requested_code: Option<&str>,
    ) -> Result<UrlMapping, AppError> {
        let Some(code) = requested_code.filter(|code| *code != existing.short_url) else {
            return Ok(existing);
        };

        self.ensure_code_available(code).await?;

        let promoted = UrlMapping {
            short_url: code.to_string(),
            url_type: UrlType::Custom,
            ..existing
        };

        self.repository.update(promoted).await
    }

    async fn create_mapping(
        &self,
        original_url: &str,
        requested_code: Option<&str>,
    ) -> Result<UrlMapping, AppError> {
        match requested_code {
            Some(code) => {
                self.ensure_code_available(code).await?;

                self.repository
                    .insert(NewUrlMapping {
                        original_url: original_url.to_string(),
                        short_url: code.to_string(),
                        url_type: UrlType::Custom,
                    })
                    .await
            }
            None => self.insert_with_generated_code(original_url).await,
        }
    }

    /// Advisory check; the store's unique constraint has the final word.
    async fn ensure_code_available(&self, code: &str) -> Result<(), AppError> {
        if self.repository.find_by_short_url(code).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Custom URL '{}' already exists",
                code
            )));
        }

        Ok(())
    }

    /// Draws candidates until one is free and inserted.
    ///
    /// A conflict reported by the store means another request took the code
    /// between the check and the insert; that counts as a collision.
    async fn insert_with_generated_code(&self, original_url: &str) -> Result<UrlMapping, AppError> {
        for _ in 0..self.settings.max_code_attempts {
            let code = self.generator.generate(self.settings.code_length);

            if self.repository.find_by_short_url(&code).await?.is_some() {
                continue;
            }

            let new_mapping = NewUrlMapping {
                original_url: original_url.to_string(),
                short_url: code,
                url_type: UrlType::Random,
            };

            match self.repository.insert(new_mapping).await {
                Err(AppError::Conflict(_)) => continue,
                result => return result,
            }
        }

        Err(AppError::internal(format!(
            "Failed to generate a unique short URL after {} attempts",
            self.settings.max_code_attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlMappingRepository;
    use crate::utils::code_generator::MockCodeGenerator;
    use chrono::Utc;

    fn create_test_mapping(id: i64, code: &str, url: &str, url_type: UrlType) -> UrlMapping {
        let now = Utc::now();
        UrlMapping {
            id,
            original_url: url.to_string(),
            short_url: code.to_string(),
            url_type,
            created_at: now,
            updated_at: now,
        }
    }

    fn settings() -> ShortenerSettings {
        ShortenerSettings {
            code_length: 10,
            max_code_attempts: 5,
            base_url: "https://s.example.com/".to_string(),
        }
    }

    fn service(repo: MockUrlMappingRepository, generator: MockCodeGenerator) -> ShorteningService {
        ShorteningService::new(Arc::new(repo), Arc::new(generator), settings())
    }

    fn fixed_generator(code: &'static str) -> MockCodeGenerator {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .returning(move |_| code.to_string());
        generator
    }

    #[tokio::test]
    async fn test_shorten_new_url_with_random_code() {
        let mut repo = MockUrlMappingRepository::new();
        repo.expect_find_by_original_url()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_find_by_short_url()
            .withf(|code| code == "Ab3dE5gH9k")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|m| m.short_url == "Ab3dE5gH9k" && m.url_type == UrlType::Random)
            .times(1)
            .returning(|m| Ok(create_test_mapping(1, &m.short_url, &m.original_url, m.url_type)));

        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .withf(|length| *length == 10)
            .times(1)
            .returning(|_| "Ab3dE5gH9k".to_string());

        let outcome = service(repo, generator)
            .shorten("https://example.com", None, UrlType::Random)
            .await
            .unwrap();

        assert!(!outcome.already_existed);
        assert_eq!(outcome.code, "Ab3dE5gH9k");
        assert_eq!(outcome.short_url, "https://s.example.com/Ab3dE5gH9k");
        assert_eq!(outcome.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_shorten_existing_url_is_read_only() {
        let mut repo = MockUrlMappingRepository::new();
        let existing = create_test_mapping(5, "existing01", "https://example.com", UrlType::Random);
        let created_at = existing.created_at;
        repo.expect_find_by_original_url()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_insert().times(0);
        repo.expect_update().times(0);

        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(0);

        let outcome = service(repo, generator)
            .shorten("https://example.com", None, UrlType::Random)
            .await
            .unwrap();

        assert!(outcome.already_existed);
        assert_eq!(outcome.code, "existing01");
        assert_eq!(outcome.created_at, created_at);
    }

    #[tokio::test]
    async fn test_shorten_existing_url_with_same_custom_code_is_noop() {
        let mut repo = MockUrlMappingRepository::new();
        let existing = create_test_mapping(5, "mycode", "https://example.com", UrlType::Custom);
        repo.expect_find_by_original_url()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_short_url().times(0);
        repo.expect_update().times(0);

        let outcome = service(repo, MockCodeGenerator::new())
            .shorten("https://example.com", Some("mycode"), UrlType::Custom)
            .await
            .unwrap();

        assert!(outcome.already_existed);
        assert_eq!(outcome.code, "mycode");
    }

    #[tokio::test]
    async fn test_shorten_existing_url_promotes_to_custom_code() {
        let mut repo = MockUrlMappingRepository::new();
        let existing = create_test_mapping(5, "Rand0mCode", "https://example.com", UrlType::Random);
        repo.expect_find_by_original_url()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_short_url()
            .withf(|code| code == "mycode")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_update()
            .withf(|m| {
                m.id == 5
                    && m.short_url == "mycode"
                    && m.url_type == UrlType::Custom
                    && m.original_url == "https://example.com"
            })
            .times(1)
            .returning(|m| Ok(m));

        let outcome = service(repo, MockCodeGenerator::new())
            .shorten("https://example.com", Some("mycode"), UrlType::Custom)
            .await
            .unwrap();

        assert!(outcome.already_existed);
        assert_eq!(outcome.code, "mycode");
        assert_eq!(outcome.short_url, "https://s.example.com/mycode");
    }

    #[tokio::test]
    async fn test_promotion_to_taken_code_fails_before_update() {
        let mut repo = MockUrlMappingRepository::new();
        let existing = create_test_mapping(5, "Rand0mCode", "https://example.com", UrlType::Random);
        let other = create_test_mapping(6, "taken", "https://other.com", UrlType::Custom);
        repo.expect_find_by_original_url()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_short_url()
            .returning(move |_| Ok(Some(other.clone())));
        repo.expect_update().times(0);

        let result = service(repo, MockCodeGenerator::new())
            .shorten("https://example.com", Some("taken"), UrlType::Custom)
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_shorten_new_url_with_custom_code() {
        let mut repo = MockUrlMappingRepository::new();
        repo.expect_find_by_original_url().returning(|_| Ok(None));
        repo.expect_find_by_short_url()
            .withf(|code| code == "mycode12")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|m| m.short_url == "mycode12" && m.url_type == UrlType::Custom)
            .times(1)
            .returning(|m| Ok(create_test_mapping(1, &m.short_url, &m.original_url, m.url_type)));

        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(0);

        let outcome = service(repo, generator)
            .shorten("https://example.com", Some("mycode12"), UrlType::Custom)
            .await
            .unwrap();

        assert!(!outcome.already_existed);
        assert_eq!(outcome.code, "mycode12");
    }

    #[tokio::test]
    async fn test_shorten_custom_code_conflict_creates_nothing() {
        let mut repo = MockUrlMappingRepository::new();
        let other = create_test_mapping(5, "taken", "https://other.com", UrlType::Custom);
        repo.expect_find_by_original_url().returning(|_| Ok(None));
        repo.expect_find_by_short_url()
            .returning(move |_| Ok(Some(other.clone())));
        repo.expect_insert().times(0);

        let result = service(repo, MockCodeGenerator::new())
            .shorten("https://example.com", Some("taken"), UrlType::Custom)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(err.to_string().contains("taken"));
    }

    #[tokio::test]
    async fn test_store_conflict_on_custom_insert_is_reported() {
        let mut repo = MockUrlMappingRepository::new();
        repo.expect_find_by_original_url().returning(|_| Ok(None));
        repo.expect_find_by_short_url().returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::conflict("Custom URL already exists")));

        let result = service(repo, MockCodeGenerator::new())
            .shorten("https://example.com", Some("racy"), UrlType::Custom)
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_custom_code_ignored_for_random_type() {
        let mut repo = MockUrlMappingRepository::new();
        repo.expect_find_by_original_url().returning(|_| Ok(None));
        repo.expect_find_by_short_url().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|m| m.short_url == "GeneratedX" && m.url_type == UrlType::Random)
            .times(1)
            .returning(|m| Ok(create_test_mapping(1, &m.short_url, &m.original_url, m.url_type)));

        let outcome = service(repo, fixed_generator("GeneratedX"))
            .shorten("https://example.com", Some("ignored"), UrlType::Random)
            .await
            .unwrap();

        assert_eq!(outcome.code, "GeneratedX");
    }

    #[tokio::test]
    async fn test_custom_type_without_code_generates_random() {
        let mut repo = MockUrlMappingRepository::new();
        repo.expect_find_by_original_url().returning(|_| Ok(None));
        repo.expect_find_by_short_url().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|m| m.url_type == UrlType::Random)
            .times(1)
            .returning(|m| Ok(create_test_mapping(1, &m.short_url, &m.original_url, m.url_type)));

        let outcome = service(repo, fixed_generator("GeneratedY"))
            .shorten("https://example.com", None, UrlType::Custom)
            .await
            .unwrap();

        assert_eq!(outcome.code, "GeneratedY");
    }

    #[tokio::test]
    async fn test_generated_code_collision_retries() {
        let mut repo = MockUrlMappingRepository::new();
        let taken = create_test_mapping(9, "collide001", "https://other.com", UrlType::Random);
        repo.expect_find_by_original_url().returning(|_| Ok(None));
        repo.expect_find_by_short_url()
            .times(3)
            .returning(move |code| {
                if code == "collide001" {
                    Ok(Some(taken.clone()))
                } else {
                    Ok(None)
                }
            });
        repo.expect_insert()
            .withf(|m| m.short_url == "freecode01")
            .times(1)
            .returning(|m| Ok(create_test_mapping(1, &m.short_url, &m.original_url, m.url_type)));

        let mut calls = 0;
        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(3).returning(move |_| {
            calls += 1;
            let code = if calls < 3 { "collide001" } else { "freecode01" };
            code.to_string()
        });

        let outcome = service(repo, generator)
            .shorten("https://example.com", None, UrlType::Random)
            .await
            .unwrap();

        assert_eq!(outcome.code, "freecode01");
    }

    #[tokio::test]
    async fn test_store_conflict_on_generated_code_retries() {
        let mut repo = MockUrlMappingRepository::new();
        repo.expect_find_by_original_url().returning(|_| Ok(None));
        repo.expect_find_by_short_url().returning(|_| Ok(None));

        let mut inserts = 0;
        repo.expect_insert().times(2).returning(move |m| {
            inserts += 1;
            if inserts == 1 {
                Err(AppError::conflict("Custom URL already exists"))
            } else {
                Ok(create_test_mapping(1, &m.short_url, &m.original_url, m.url_type))
            }
        });

        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(2).returning(|_| "anycode001".to_string());

        let outcome = service(repo, generator)
            .shorten("https://example.com", None, UrlType::Random)
            .await
            .unwrap();

        assert!(!outcome.already_existed);
    }

    #[tokio::test]
    async fn test_generation_gives_up_after_max_attempts() {
        let mut repo = MockUrlMappingRepository::new();
        let taken = create_test_mapping(9, "always", "https://other.com", UrlType::Random);
        repo.expect_find_by_original_url().returning(|_| Ok(None));
        repo.expect_find_by_short_url()
            .times(5)
            .returning(move |_| Ok(Some(taken.clone())));
        repo.expect_insert().times(0);

        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(5).returning(|_| "always".to_string());

        let result = service(repo, generator)
            .shorten("https://example.com", None, UrlType::Random)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(err.to_string().contains("5 attempts"));
    }

    #[tokio::test]
    async fn test_shorten_invalid_url() {
        let repo = MockUrlMappingRepository::new();

        let result = service(repo, MockCodeGenerator::new())
            .shorten("not-a-url", None, UrlType::Random)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_shorten_invalid_custom_code() {
        let repo = MockUrlMappingRepository::new();

        let result = service(repo, MockCodeGenerator::new())
            .shorten("https://example.com", Some("way-too-long-code"), UrlType::Custom)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut repo = MockUrlMappingRepository::new();
        repo.expect_find_by_original_url()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error: connection reset")));

        let result = service(repo, MockCodeGenerator::new())
            .shorten("https://example.com", None, UrlType::Random)
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_url_is_trimmed_before_lookup() {
        let mut repo = MockUrlMappingRepository::new();
        let existing = create_test_mapping(5, "existing01", "https://example.com", UrlType::Random);
        repo.expect_find_by_original_url()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let outcome = service(repo, MockCodeGenerator::new())
            .shorten("  https://example.com \n", None, UrlType::Random)
            .await
            .unwrap();

        assert!(outcome.already_existed);
    }

    #[test]
    fn test_short_url_for_trims_trailing_slash() {
        let svc = service(MockUrlMappingRepository::new(), MockCodeGenerator::new());
        assert_eq!(svc.short_url_for("abc"), "https://s.example.com/abc");
    }
}
