//! Application error type and its HTTP representation.
//!
//! Every failure surfaced by the services maps onto one [`AppError`] variant,
//! and every variant maps onto a stable integer [`ErrorCode`] that clients can
//! match on. Responses use the shape:
//!
//! ```json
//! { "detail": [ { "msg": "Short URL not found", "type": "short.url.not.found", "error_code": 1002 } ] }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::utils::db_error::is_unique_violation_on_short_url;

/// Stable error codes exposed in error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl = 1000,
    InternalServerError = 1001,
    ShortUrlNotFound = 1002,
    CustomUrlAlreadyExists = 1003,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Dotted machine-readable kind, e.g. `short.url.not.found`.
    pub fn kind(self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalid.url",
            Self::InternalServerError => "internal.server.error",
            Self::ShortUrlNotFound => "short.url.not.found",
            Self::CustomUrlAlreadyExists => "custom.url.already.exists",
        }
    }

    /// Default human-readable message for the code.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::InternalServerError => "Internal Server Error",
            Self::ShortUrlNotFound => "Short URL not found",
            Self::CustomUrlAlreadyExists => "Custom URL already exists",
        }
    }
}

/// One entry of the `detail` list in an error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub error_code: u16,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: Vec<ErrorDetail>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL, custom code or request body.
    #[error("{0}")]
    Validation(String),

    /// Unknown short code.
    #[error("{0}")]
    NotFound(String),

    /// Short code already held by another mapping.
    #[error("{0}")]
    Conflict(String),

    /// Storage failure or any other unexpected condition.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::InvalidUrl,
            Self::NotFound(_) => ErrorCode::ShortUrlNotFound,
            Self::Conflict(_) => ErrorCode::CustomUrlAlreadyExists,
            Self::Internal(_) => ErrorCode::InternalServerError,
        }
    }

    /// Conflicts are a client error here, not 409: the caller picked a taken code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_detail(&self) -> ErrorDetail {
        let code = self.error_code();
        let msg = match self {
            // Internal messages may carry driver text; never echo them to clients.
            Self::Internal(_) => code.default_message().to_string(),
            Self::Validation(m) | Self::NotFound(m) | Self::Conflict(m) => m.clone(),
        };

        ErrorDetail {
            msg,
            kind: code.kind(),
            error_code: code.as_u16(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(message) = &self {
            tracing::error!(error = %message, "Request failed with internal error");
        }

        let body = ErrorBody {
            detail: vec![self.to_error_detail()],
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_short_url(&e) {
            return AppError::conflict("Custom URL already exists");
        }

        AppError::internal(format!("Database error: {}", e))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(e.to_string())
    }
}
