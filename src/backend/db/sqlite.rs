/**
 * SQLite Storage
 *
 * `SqliteConnector` opens the account store for the `ConnectionCache`:
 * it builds the pool, checks that a connection can be acquired, and runs
 * the embedded migrations. `SqliteStore` is the resulting handle and
 * implements `AccountStore` on top of the queries in `auth::accounts`.
 */
use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use crate::backend::auth::accounts::{self, Account, NewAccount};
use crate::backend::db::cache::{ConnectError, Connector};
use crate::backend::db::store::{AccountStore, StoreError};
use crate::shared::{AppConfig, ConfigError};

/// Migrations under `migrations/`, embedded at compile time
pub static MIGRATOR: Migrator = sqlx::migrate!();

const SQLITE_SCHEME: &str = "sqlite:";

/// Opens `SqliteStore` handles
#[derive(Clone, Debug)]
pub struct SqliteConnector {
    options: SqliteConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
}

impl SqliteConnector {
    /// Build a connector from the application configuration
    ///
    /// Only parses the URL; nothing is opened until `connect()`.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` if `database_url` is not a SQLite URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: "DATABASE_URL",
            value: config.database_url.clone(),
        };

        // sqlx treats any other string as a bare file name
        if !config.database_url.starts_with(SQLITE_SCHEME) {
            return Err(invalid());
        }

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|_| invalid())?
            .create_if_missing(true);

        Ok(Self {
            options,
            max_connections: config.max_connections,
            acquire_timeout: config.connect_timeout,
        })
    }
}

impl Connector for SqliteConnector {
    type Handle = SqliteStore;

    async fn connect(&self) -> Result<SqliteStore, ConnectError> {
        tracing::info!("Connecting to database...");

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect_with(self.options.clone())
            .await
            .map_err(|e| {
                tracing::error!("Failed to create database connection pool: {:?}", e);
                ConnectError::Refused(e.to_string())
            })?;

        tracing::info!("Running database migrations...");
        if let Err(e) = MIGRATOR.run(&pool).await {
            tracing::error!("Failed to run database migrations: {:?}", e);
            pool.close().await;
            return Err(ConnectError::Setup(e.to_string()));
        }

        tracing::info!("Database ready");
        Ok(SqliteStore { pool })
    }
}

/// Account store backed by a SQLite pool
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl AccountStore for SqliteStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        accounts::get_account_by_email(&self.pool, email).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        accounts::get_account_by_id(&self.pool, id).await
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        accounts::create_account(&self.pool, account).await
    }
}
