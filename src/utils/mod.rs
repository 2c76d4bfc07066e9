//! Utility functions for code generation, URL validation, and database errors.
//!
//! - [`code_generator`] - Random short code generation and custom code validation
//! - [`url_validator`] - Validation of URLs submitted for shortening
//! - [`db_error`] - Recognition of short code uniqueness violations

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
