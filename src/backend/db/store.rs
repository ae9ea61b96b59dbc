/**
 * Account Store
 *
 * The storage seam used by the signup handler and the credential verifier.
 * `SqliteStore` is the production implementation; tests substitute fakes
 * that count calls or simulate races.
 */
use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::accounts::{Account, NewAccount};
use crate::backend::db::cache::{CachedConnection, ConnectionCache, Connector};

/// Storage query failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The storage uniqueness constraint rejected the insert
    #[error("account already exists")]
    Duplicate,

    /// The store stopped answering; the connection should be discarded
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be turned into an `Account`
    #[error("corrupt account record: {0}")]
    Corrupt(String),

    /// Any other query failure
    #[error("query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Whether the failure points at the connection rather than the query
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_) => StoreError::Corrupt(err.to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}

/// Account persistence operations
///
/// Implementations must enforce identifier uniqueness atomically on
/// `insert` and report a violation as `StoreError::Duplicate`. The signup
/// handler's existence check alone is not race-proof.
pub trait AccountStore: Clone + Send + Sync + 'static {
    /// Look up an account by normalized email
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;

    /// Look up an account by ID
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;

    /// Insert a new account; timestamps are assigned by the store
    fn insert(&self, account: NewAccount) -> impl Future<Output = Result<Account, StoreError>> + Send;
}

/// Discard `conn` from the cache if `err` says the store stopped answering
///
/// Returns the error unchanged so callers can keep mapping it.
pub fn discard_if_unavailable<C: Connector>(
    cache: &ConnectionCache<C>,
    conn: &CachedConnection<C::Handle>,
    err: StoreError,
) -> StoreError {
    if err.is_unavailable() {
        cache.invalidate(conn);
    }
    err
}
