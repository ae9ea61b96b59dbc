//! Shared Error Types
//!
//! This module defines error types that do not depend on the server stack.
//! They describe user-correctable input problems and are converted into
//! HTTP responses by `backend::error`.
//!
//! # Error Categories
//!
//! - `ValidationError` - One or more request fields failed validation
//! - `InvalidRole` - A stored or supplied role is not one of the known roles
//!
//! # Usage
//!
//! ```rust
//! use legacy_ledger::shared::error::{FieldError, SharedError};
//!
//! let error = SharedError::validation(vec![
//!     FieldError::new("password", "Password must be at least 8 characters"),
//! ]);
//! assert_eq!(error.field_errors().len(), 1);
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the request field, as it appears in the JSON body
    pub field: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Request validation failed
    ///
    /// Carries every field-level problem found, not only the first one.
    #[error("Validation failed: {}", describe(.errors))]
    ValidationError {
        /// All field problems, in field order
        errors: Vec<FieldError>,
    },

    /// Unknown account role
    #[error("Invalid role: {value}")]
    InvalidRole {
        /// The rejected role string
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error from a list of field problems
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::ValidationError { errors }
    }

    /// Create a new invalid role error
    pub fn invalid_role(value: impl Into<String>) -> Self {
        Self::InvalidRole {
            value: value.into(),
        }
    }

    /// Field problems carried by this error (empty for non-validation errors)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::ValidationError { errors } => errors,
            Self::InvalidRole { .. } => &[],
        }
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
