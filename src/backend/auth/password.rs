/**
 * Password Hashing
 *
 * bcrypt hashing and comparison, run on tokio's blocking pool so a slow
 * hash never stalls the request executor.
 */

use thiserror::Error;

/// Real bcrypt hash (cost 10) compared against when no account exists,
/// so the absent-account path does the same work as a wrong password.
pub const DUMMY_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Hash a password with the given bcrypt cost
///
/// Passwords over 72 bytes are an error rather than silently truncated.
pub async fn hash_password(password: String, cost: u32) -> Result<String, PasswordError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::non_truncating_hash(password, cost)).await??;
    Ok(hashed)
}

/// Compare a password against a stored bcrypt hash
///
/// # Returns
/// `true` on match. A password over 72 bytes never matches, since no
/// stored hash can come from one. A malformed stored hash is an error,
/// not a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    let result = tokio::task::spawn_blocking(move || bcrypt::non_truncating_verify(password, &hash)).await?;
    match result {
        Ok(matches) => Ok(matches),
        Err(bcrypt::BcryptError::Truncation(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Burn one comparison against `DUMMY_HASH`; the outcome is discarded
pub async fn verify_dummy(password: String) {
    if let Err(e) = verify_password(password, DUMMY_HASH.to_string()).await {
        tracing::debug!("Dummy hash comparison failed: {}", e);
    }
}
