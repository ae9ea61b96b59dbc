//! Legacy Ledger - Account Service
//!
//! Legacy Ledger is a digital asset inheritance product. This crate holds its
//! account backend: a lazily established, process-wide storage connection
//! shared by every request handler, and the signup / sign-in flow built on
//! top of it.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that do not depend on the server stack
//!   - Account roles and public account views
//!   - Field validation for signup input
//!   - Configuration and shared error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and routes
//!   - Connection cache with single-flight establishment
//!   - Signup handler, credential verifier and session tokens
//!   - SQLite persistence via sqlx
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend module and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use legacy_ledger::backend::server::init::create_app;
//! use legacy_ledger::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The connection cache is the only state shared across requests. It is
//! owned by `AppState` behind an `Arc` and guards its slot with a short-held
//! mutex; concurrent callers join one in-flight establishment attempt.
//!
//! # Error Handling
//!
//! - `shared::SharedError` / `shared::FieldError` for validation
//! - `backend::db::ConnectError` and `backend::db::StoreError` for storage
//! - `backend::error::BackendError` for everything surfaced over HTTP

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
