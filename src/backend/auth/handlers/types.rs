/**
 * Authentication Handler Types
 *
 * Request and response bodies of the auth endpoints, plus the settings the
 * handlers read from configuration.
 *
 * Request fields default to empty strings so a missing field is reported
 * as a validation problem on that field rather than as an unreadable body.
 * Request `Debug` output never includes the password.
 */

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{AccountView, AppConfig};

/// Sign up request
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct SignupRequest {
    /// Display name (at least 2 characters after trimming)
    #[serde(default)]
    pub name: String,
    /// Email address (normalized before storage)
    #[serde(default)]
    pub email: String,
    /// Password (at least 8 characters, hashed before storage)
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Sign-in request
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for SigninRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigninRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Signup response (201)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignupResponse {
    /// Always "User created successfully"
    pub message: String,
    pub user: AccountView,
}

/// Sign-in response (200)
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    /// Session token for `Authorization: Bearer`
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
    pub user: AccountView,
}

/// Deadlines and hashing cost used by the auth handlers
#[derive(Debug, Clone, Copy)]
pub struct AuthSettings {
    /// Bound on the signup existence check
    pub lookup_timeout: Duration,
    /// Overall deadline for signup and sign-in
    pub request_timeout: Duration,
    /// bcrypt work factor for new accounts
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            lookup_timeout: config.lookup_timeout,
            request_timeout: config.request_timeout,
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
