/**
 * Credential Verifier
 *
 * Checks an email / password pair against the stored account.
 *
 * The three outcomes are kept apart here so they can be logged, but the
 * sign-in endpoint reports `Mismatch` and `NoSuchAccount` identically.
 * When no account exists a comparison against `password::DUMMY_HASH` is
 * still performed, so both failure paths take about the same time.
 */

use std::sync::Arc;

use crate::backend::auth::accounts::Account;
use crate::backend::auth::password::{verify_dummy, verify_password};
use crate::backend::db::{discard_if_unavailable, AccountStore, ConnectionCache, Connector};
use crate::backend::error::BackendError;
use crate::shared::normalize_email;

/// Result of a credential check
#[derive(Debug)]
pub enum Verification {
    /// Password matches the stored hash
    Verified(Account),
    /// Account exists, password does not match
    Mismatch,
    /// No account with this email
    NoSuchAccount,
}

pub struct CredentialVerifier<C: Connector> {
    cache: Arc<ConnectionCache<C>>,
}

impl<C: Connector> Clone for CredentialVerifier<C> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
        }
    }
}

impl<C> CredentialVerifier<C>
where
    C: Connector,
    C::Handle: AccountStore,
{
    pub fn new(cache: Arc<ConnectionCache<C>>) -> Self {
        Self { cache }
    }

    /// Verify an email / password pair
    ///
    /// # Errors
    ///
    /// * `ServiceUnavailable` - store could not be reached (the cached
    ///   handle is discarded if the lookup itself lost the connection)
    /// * `Unexpected` - lookup or hash comparison failed otherwise
    pub async fn verify(&self, email: &str, password: &str) -> Result<Verification, BackendError> {
        let email = normalize_email(email);
        let conn = self.cache.get().await?;

        let account = conn
            .find_by_email(&email)
            .await
            .map_err(|e| BackendError::from(discard_if_unavailable(&self.cache, &conn, e)))?;

        let Some(account) = account else {
            verify_dummy(password.to_string()).await;
            return Ok(Verification::NoSuchAccount);
        };

        let matches = verify_password(password.to_string(), account.password_hash.clone())
            .await
            .map_err(|e| BackendError::unexpected(format!("password comparison failed: {}", e)))?;

        if matches {
            Ok(Verification::Verified(account))
        } else {
            Ok(Verification::Mismatch)
        }
    }
}
