//! Authentication Module
//!
//! This module handles account registration, credential verification and
//! session tokens.
//!
//! # Architecture
//!
//! - **`accounts`** - Account model and database queries
//! - **`password`** - bcrypt hashing on the blocking pool
//! - **`verifier`** - Email / password check against the store
//! - **`sessions`** - JWT session tokens
//! - **`handlers`** - HTTP handlers for the auth endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── accounts.rs     - Account model and database operations
//! ├── password.rs     - Password hashing
//! ├── verifier.rs     - Credential verifier
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email, password → validated → account stored with a
//!    bcrypt hash → public account returned
//! 2. **Sign-in**: email, password → verified → session token returned
//! 3. **Me**: session token → verified → public account returned
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt (cost 10 by default) before storage
//! - Sign-in failures return one generic 401 message
//! - Tokens expire after 30 days by default

/// Account data model and database operations
pub mod accounts;

/// Password hashing
pub mod password;

/// Credential verification
pub mod verifier;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use accounts::{Account, NewAccount};
pub use handlers::{get_me, signin, signup, AuthSettings, SigninRequest, SignupRequest};
pub use sessions::{Claims, SessionKeys};
pub use verifier::{CredentialVerifier, Verification};
