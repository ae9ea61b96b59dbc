//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Session token verification for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use legacy_ledger::backend::auth::get_me;
//! use legacy_ledger::backend::middleware::auth_middleware;
//! use legacy_ledger::backend::server::AppState;
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/api/auth/me", get(get_me))
//!         .route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, authenticate, AuthUser, AuthenticatedUser};
