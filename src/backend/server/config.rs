/**
 * Server Configuration
 *
 * This module turns the application configuration into the storage
 * connector, and optionally warms the connection cache at startup.
 *
 * # Error Handling
 *
 * An unusable `DATABASE_URL` is a startup error. A store that cannot be
 * reached at startup is not: the failure is logged, the server starts
 * anyway, and the cache retries on the first request that needs storage.
 */

use crate::backend::db::{ConnectionCache, Connector, SqliteConnector};
use crate::shared::{AppConfig, ConfigError};

/// Build the storage connector from configuration
///
/// Does not connect.
///
/// # Errors
///
/// `ConfigError::InvalidValue` if `DATABASE_URL` is not a SQLite URL
pub fn load_connector(config: &AppConfig) -> Result<SqliteConnector, ConfigError> {
    tracing::info!("Using database at {}", config.database_url);
    SqliteConnector::from_config(config)
}

/// Establish the storage connection ahead of the first request
///
/// # Returns
///
/// `true` if the cache now holds a live handle. Failures are logged and
/// reported as `false`; they never prevent startup.
pub async fn warm_up<C: Connector>(cache: &ConnectionCache<C>) -> bool {
    match cache.get().await {
        Ok(conn) => {
            tracing::info!("Storage ready (generation {})", conn.generation());
            true
        }
        Err(e) => {
            tracing::error!("Failed to connect to storage at startup: {}", e);
            tracing::warn!("Continuing; connection will be retried on demand");
            false
        }
    }
}
