//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted short code to original URL mapping
//! - [`NewUrlMapping`] - Input for creating a mapping
//! - [`ShortenOutcome`] - What a shortening request returns

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, ShortenOutcome, UrlMapping, UrlType};
