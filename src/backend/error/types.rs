/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the HTTP layer. Every handler
 * failure ends up as one of these variants, which decides the status code
 * and the message the client sees.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * Carry user-facing detail:
 * - `Validation` - field-level problems (400)
 * - `BadRequest` - body could not be read at all (400)
 * - `Conflict` - account already exists (400)
 * - `Unauthorized` - credentials or session rejected (401)
 * - `NotFound` - resource no longer exists (404)
 *
 * ## Server Errors
 *
 * Carry internal detail that is logged but never sent to the client:
 * - `ServiceUnavailable` - storage could not be reached (503)
 * - `Timeout` - request deadline or lookup bound exceeded (408)
 * - `Unexpected` - anything else (500)
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::db::{ConnectError, StoreError};
use crate::shared::{FieldError, SharedError};

pub const MSG_INVALID_INPUT: &str = "Invalid input";
pub const MSG_DUPLICATE_ACCOUNT: &str = "User with this email already exists";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const MSG_UNAVAILABLE: &str = "Database connection failed. Please try again later.";
pub const MSG_TIMEOUT: &str = "Request timeout. Please try again.";
pub const MSG_UNEXPECTED: &str = "Internal server error. Please try again later.";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use legacy_ledger::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::conflict("User with this email already exists");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::unavailable("pool timed out");
/// assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more request fields are invalid
    #[error("Validation failed: {} field error(s)", errors.len())]
    Validation {
        /// Every field problem found
        errors: Vec<FieldError>,
    },

    /// The request body could not be parsed
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// An account with the same identifier already exists
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Credentials or session token rejected
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The requested resource does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Storage could not be reached or stopped answering
    #[error("Service unavailable: {detail}")]
    ServiceUnavailable {
        /// Internal detail, logged only
        detail: String,
    },

    /// A deadline was exceeded
    #[error("Timeout: {detail}")]
    Timeout {
        /// Internal detail, logged only
        detail: String,
    },

    /// Any other failure
    #[error("Unexpected error: {detail}")]
    Unexpected {
        /// Internal detail, logged only
        detail: String,
    },
}

impl BackendError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            detail: detail.into(),
        }
    }

    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::Timeout {
            detail: detail.into(),
        }
    }

    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected {
            detail: detail.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `BadRequest`, `Conflict` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `Timeout` - 408 Request Timeout
    /// - `ServiceUnavailable` - 503 Service Unavailable
    /// - `Unexpected` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } | Self::Conflict { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Server-side variants return a fixed message; their detail is only
    /// available through `Display` for logging.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { .. } => MSG_INVALID_INPUT.to_string(),
            Self::BadRequest { message }
            | Self::Conflict { message }
            | Self::Unauthorized { message }
            | Self::NotFound { message } => message.clone(),
            Self::ServiceUnavailable { .. } => MSG_UNAVAILABLE.to_string(),
            Self::Timeout { .. } => MSG_TIMEOUT.to_string(),
            Self::Unexpected { .. } => MSG_UNEXPECTED.to_string(),
        }
    }

    /// Field problems, for validation errors
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { errors } => Self::Validation { errors },
            other => Self::unexpected(other.to_string()),
        }
    }
}

impl From<ConnectError> for BackendError {
    fn from(err: ConnectError) -> Self {
        Self::unavailable(err.to_string())
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => Self::conflict(MSG_DUPLICATE_ACCOUNT),
            StoreError::Unavailable(detail) => Self::unavailable(detail),
            other => Self::unexpected(other.to_string()),
        }
    }
}
