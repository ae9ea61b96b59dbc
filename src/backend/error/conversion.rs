/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, plus the mapping of axum's JSON body
 * rejection into a `BackendError`.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Invalid input",
 *   "status": 400,
 *   "errors": [{ "field": "password", "message": "Password must be at least 8 characters" }]
 * }
 * ```
 *
 * `errors` is present only for validation failures.
 */

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::backend::error::types::BackendError;
use crate::shared::FieldError;

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl From<&BackendError> for ErrorBody {
    fn from(err: &BackendError) -> Self {
        Self {
            error: err.message(),
            status: err.status_code().as_u16(),
            errors: err.field_errors().map(|errors| errors.to_vec()),
        }
    }
}

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// Server-side errors are logged here with their internal detail; the
    /// body only ever carries the client-facing message.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() || status == axum::http::StatusCode::REQUEST_TIMEOUT {
            tracing::error!("Request failed with {}: {}", status, self);
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        BackendError::bad_request("Invalid request body")
    }
}
