/**
 * Session Management and JWT Tokens
 *
 * This module issues and verifies the session token returned by sign-in.
 * Tokens are HS256 JWTs carrying the account id, email, name and role.
 */

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::accounts::Account;
use crate::shared::{AppConfig, Role};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Account ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Display name
    pub name: String,
    /// Account role
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Account ID carried in `sub`
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// A freshly issued session token
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signing and verification keys plus the session lifetime
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, config.session_ttl)
    }

    /// Create a session token for an account
    ///
    /// # Returns
    /// Token string and its expiry (now + session TTL)
    pub fn issue(&self, account: &Account) -> Result<IssuedSession, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        // TTL comes from validated config, far below chrono's limits
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);

        let claims = Claims {
            sub: account.id.to_string(),
            email: account.email.clone(),
            name: account.name.clone(),
            role: account.role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(IssuedSession { token, expires_at })
    }

    /// Verify and decode a session token
    ///
    /// # Errors
    /// Bad signature, malformed token, or expired `exp`
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}
