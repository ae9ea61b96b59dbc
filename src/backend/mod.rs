//! Backend Module
//!
//! This module contains all server-side code for the Legacy Ledger account
//! service: an Axum HTTP server for signup, sign-in and session lookup on
//! top of a lazily established, process-wide storage connection.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Accounts, password hashing, credential verification,
//!   session tokens, auth handlers
//! - **`db`** - Connection cache, account store trait, SQLite store
//! - **`middleware`** - Session token verification
//! - **`error`** - Backend error taxonomy and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── db/             - Storage access
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! ```text
//! signup:  request → validation → ConnectionCache → existence check
//!          → bcrypt hash → insert → 201
//! signin:  request → ConnectionCache → CredentialVerifier → SessionKeys → 200
//! ```
//!
//! # Concurrency
//!
//! Each request runs as its own tokio task. The only state shared across
//! requests is the `ConnectionCache`: a short-held mutex guards its slot,
//! and concurrent callers await one shared establishment attempt. Account
//! uniqueness under concurrent signups is enforced by the store's UNIQUE
//! constraint. bcrypt runs on the blocking pool.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Storage access
pub mod db;

/// Backend error types
pub mod error;

/// Authentication and account management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState};
