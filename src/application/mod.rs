//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::ShorteningService`] - Short link creation with dedup and custom codes
//! - [`services::RedirectService`] - Short code resolution

pub mod services;
