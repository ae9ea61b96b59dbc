//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types, AuthSettings
//! ├── signup.rs   - Account registration handler
//! ├── signin.rs   - Credential check and session issue
//! └── me.rs       - Current account handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup - Account registration
//! - **`signin`** - POST /api/auth/signin - Sign-in
//! - **`get_me`** - GET /api/auth/me - Current account
//!
//! Each handler is a thin axum wrapper around a `process_*` / `load_*`
//! function that is generic over the storage `Connector`, so the flow can
//! be exercised against an in-memory store.

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Sign-in handler
pub mod signin;

/// Get current account handler
pub mod me;

// Re-export commonly used types
pub use types::{AuthSettings, SigninRequest, SigninResponse, SignupRequest, SignupResponse};

// Re-export handlers
pub use me::get_me;
pub use signin::signin;
pub use signup::signup;
