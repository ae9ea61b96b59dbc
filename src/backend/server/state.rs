/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The storage connection cache (one per process, shared by all handlers)
 * - The credential verifier built on that cache
 * - Session signing keys
 * - Auth deadlines and hashing cost
 *
 * Everything is cheap to clone: the cache sits behind an `Arc`, and the
 * rest is small immutable data.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::handlers::types::AuthSettings;
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::verifier::CredentialVerifier;
use crate::backend::db::{ConnectionCache, SqliteConnector};

/// Connection cache over the SQLite store
pub type AccountCache = ConnectionCache<SqliteConnector>;

/// Application state shared by every handler
///
/// # Usage
///
/// ```rust,no_run
/// use legacy_ledger::backend::server::state::AppState;
/// use axum::extract::State;
///
/// async fn handler(State(app_state): State<AppState>) -> &'static str {
///     if app_state.accounts.is_connected() { "connected" } else { "idle" }
/// }
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Storage connection cache
    ///
    /// Nothing is connected until the first request that needs storage.
    pub accounts: Arc<AccountCache>,

    /// Credential verifier used by sign-in
    pub verifier: CredentialVerifier<SqliteConnector>,

    /// Session token keys
    pub sessions: SessionKeys,

    /// Deadlines and bcrypt cost
    pub auth: AuthSettings,
}

impl AppState {
    pub fn new(connector: SqliteConnector, config: &crate::shared::AppConfig) -> Self {
        let accounts = Arc::new(ConnectionCache::new(connector, config.connect_timeout));
        Self {
            verifier: CredentialVerifier::new(accounts.clone()),
            accounts,
            sessions: SessionKeys::from_config(config),
            auth: AuthSettings::from_config(config),
        }
    }
}

/// Implement FromRef for the connection cache
///
/// This allows handlers to extract `State<Arc<AccountCache>>` directly,
/// as the health probe does.
impl FromRef<AppState> for Arc<AccountCache> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.accounts.clone()
    }
}
