//! Database test fixtures and utilities
//!
//! Every fixture gets its own SQLite file in a temporary directory, removed
//! when the fixture is dropped, so tests never share state.

#[cfg(feature = "ssr")]
use legacy_ledger::backend::db::sqlite::MIGRATOR;
#[cfg(feature = "ssr")]
use legacy_ledger::shared::AppConfig;
#[cfg(feature = "ssr")]
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
#[cfg(feature = "ssr")]
use std::path::PathBuf;
#[cfg(feature = "ssr")]
use tempfile::TempDir;

/// Secret used to sign session tokens in tests
pub const TEST_JWT_SECRET: &str = "legacy-ledger-test-secret";

/// Test database fixture
///
/// Holds the temporary directory; the database file lives as long as the
/// fixture does.
#[cfg(feature = "ssr")]
pub struct TestDatabase {
    dir: TempDir,
}

#[cfg(feature = "ssr")]
impl TestDatabase {
    /// Create a new, empty test database location
    ///
    /// The file is created by the first connection.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Path of the database file
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("legacy-ledger-test.db")
    }

    /// sqlx URL of the database file
    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path().display())
    }

    /// Application configuration pointing at this database
    ///
    /// Uses the lowest bcrypt cost to keep tests fast.
    pub fn config(&self) -> AppConfig {
        config_for_url(self.url())
    }

    /// Open a separate pool on this database, with migrations applied
    pub async fn pool(&self) -> SqlitePool {
        let options = SqliteConnectOptions::new()
            .filename(self.path())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to create test database pool");
        run_migrations(&pool).await.expect("Failed to run migrations");
        pool
    }
}

/// Configuration for an arbitrary storage URL
#[cfg(feature = "ssr")]
pub fn config_for_url(url: String) -> AppConfig {
    AppConfig::builder()
        .database_url(url)
        .jwt_secret(TEST_JWT_SECRET)
        .bcrypt_cost(4)
        .connect_timeout(std::time::Duration::from_secs(2))
        .build()
        .expect("Failed to build test config")
}

/// Run database migrations for testing
#[cfg(feature = "ssr")]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
