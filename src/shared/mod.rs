//! Shared Module
//!
//! This module contains types that do not depend on the server stack:
//! account roles and the public account view, signup validation,
//! configuration, and shared error types.

/// Account role and public account view
pub mod account;

/// Shared error types
pub mod error;

/// Signup input validation
pub mod validation;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use account::{AccountView, Role};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{FieldError, SharedError};
pub use validation::{normalize_email, validate_signup, ValidSignup};
