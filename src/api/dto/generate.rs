//! DTOs for the short URL generation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{ShortenOutcome, UrlType};

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL"))]
    pub original_url: String,

    /// Optional custom short code, honoured (and validated) only when
    /// `url_type` is `CUSTOM`.
    pub short_url: Option<String>,

    #[serde(default)]
    pub url_type: UrlType,
}

/// Response for a successful generation.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Fully-qualified redirect URL.
    pub short_url: String,
    pub original_url: String,
    /// True when the URL had already been shortened before this request.
    pub is_short_url_exists: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ShortenOutcome> for GenerateResponse {
    fn from(outcome: ShortenOutcome) -> Self {
        Self {
            short_url: outcome.short_url,
            original_url: outcome.original_url,
            is_short_url_exists: outcome.already_existed,
            created_at: outcome.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_to_random() {
        let request: GenerateRequest =
            serde_json::from_str(r#"{ "original_url": "https://example.com" }"#).unwrap();

        assert_eq!(request.url_type, UrlType::Random);
        assert!(request.short_url.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_invalid_url() {
        let request: GenerateRequest =
            serde_json::from_str(r#"{ "original_url": "not a url" }"#).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_leaves_custom_code_to_the_service() {
        let request: GenerateRequest = serde_json::from_str(
            r#"{ "original_url": "https://example.com", "short_url": "a b", "url_type": "RANDOM" }"#,
        )
        .unwrap();

        assert_eq!(request.short_url.as_deref(), Some("a b"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_serialization() {
        let created_at = Utc::now();
        let response = GenerateResponse::from(ShortenOutcome {
            code: "abc".to_string(),
            short_url: "https://s.example.com/abc".to_string(),
            original_url: "https://example.com".to_string(),
            already_existed: true,
            created_at,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["short_url"], "https://s.example.com/abc");
        assert_eq!(json["original_url"], "https://example.com");
        assert_eq!(json["is_short_url_exists"], true);
        assert!(json["created_at"].is_string());
    }
}
