//! URL mapping entity: the association between an original URL and its short code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a short code was generated by the service or chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UrlType {
    #[default]
    Random,
    Custom,
}

impl UrlType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "RANDOM",
            Self::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for UrlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrlType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RANDOM" => Ok(Self::Random),
            "CUSTOM" => Ok(Self::Custom),
            other => Err(format!("unknown url type: {}", other)),
        }
    }
}

/// A persisted mapping from a short code to an original URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_url: String,
    pub url_type: UrlType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new mapping. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub short_url: String,
    pub url_type: UrlType,
}

/// Result of a shortening request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    /// Short code as stored.
    pub code: String,
    /// Fully-qualified redirect URL, `<base>/<code>`.
    pub short_url: String,
    pub original_url: String,
    /// True when a mapping for `original_url` existed before this request.
    pub already_existed: bool,
    pub created_at: DateTime<Utc>,
}
