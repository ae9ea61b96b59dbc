//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and its
//! conversion into HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` taxonomy, status codes, client messages
//! - **`conversion`** - `IntoResponse` and body-rejection conversion
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! Lower layers have their own `thiserror` enums (`SharedError`,
//! `ConnectError`, `StoreError`); each converts into `BackendError` with
//! `From`, so handlers can use `?` throughout.
//!
//! # Example
//!
//! ```rust,no_run
//! use legacy_ledger::backend::error::BackendError;
//! use axum::response::Json;
//!
//! async fn handler() -> Result<Json<()>, BackendError> {
//!     Err(BackendError::not_found("User not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::ErrorBody;
pub use types::{
    BackendError, MSG_DUPLICATE_ACCOUNT, MSG_INVALID_CREDENTIALS, MSG_INVALID_INPUT, MSG_TIMEOUT,
    MSG_UNAVAILABLE, MSG_UNEXPECTED,
};
