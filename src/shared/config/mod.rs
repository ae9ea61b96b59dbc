//! Application configuration module
//!
//! Provides the configuration used by the server: storage location and pool
//! size, the connect / lookup / request deadlines, session signing and
//! password hashing parameters, and the bind address.
//!
//! Configuration is assembled with `AppConfigBuilder`; `AppConfig::from_env`
//! feeds the builder from environment variables (a `.env` file is loaded by
//! the server binary before this runs).

use std::time::Duration;

use thiserror::Error;

/// Default storage location, created on first connect
pub const DEFAULT_DATABASE_URL: &str = "sqlite://legacy-ledger.db?mode=rwc";

/// Signing secret used in debug builds when none is configured
const DEV_JWT_SECRET: &str = "legacy-ledger-dev-secret-change-in-production";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_SESSION_TTL_DAYS: u64 = 30;
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// bcrypt accepts costs in this range
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Longest session lifetime accepted, in days
const MAX_SESSION_TTL_DAYS: u64 = 3650;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// sqlx connection URL for the account store
    pub database_url: String,
    /// Upper bound on pooled storage connections
    pub max_connections: u32,
    /// Bound on establishing the storage connection
    pub connect_timeout: Duration,
    /// Bound on the signup existence check
    pub lookup_timeout: Duration,
    /// Overall deadline for a signup or sign-in request
    pub request_timeout: Duration,
    /// HS256 secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub session_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("lookup_timeout", &self.lookup_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("jwt_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `DATABASE_URL` | `sqlite://legacy-ledger.db?mode=rwc` |
    /// | `DB_MAX_CONNECTIONS` | `5` |
    /// | `DB_CONNECT_TIMEOUT_MS` | `10000` |
    /// | `DB_LOOKUP_TIMEOUT_MS` | `5000` |
    /// | `REQUEST_TIMEOUT_MS` | `30000` |
    /// | `JWT_SECRET` | required in release builds |
    /// | `SESSION_TTL_DAYS` | `30` (at most 3650) |
    /// | `BCRYPT_COST` | `10` |
    /// | `SERVER_HOST` | `0.0.0.0` |
    /// | `SERVER_PORT` | `3000` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(url) = env_value("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(n) = env_parse::<u32>("DB_MAX_CONNECTIONS")? {
            builder = builder.max_connections(n);
        }
        if let Some(ms) = env_parse::<u64>("DB_CONNECT_TIMEOUT_MS")? {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = env_parse::<u64>("DB_LOOKUP_TIMEOUT_MS")? {
            builder = builder.lookup_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = env_parse::<u64>("REQUEST_TIMEOUT_MS")? {
            builder = builder.request_timeout(Duration::from_millis(ms));
        }
        if let Some(secret) = env_value("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(days) = env_parse::<u64>("SESSION_TTL_DAYS")? {
            builder = builder.session_ttl(session_ttl_from_days(days)?);
        }
        if let Some(cost) = env_parse::<u32>("BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(host) = env_value("SERVER_HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT")? {
            builder = builder.port(port);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("DATABASE_URL"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::OutOfRange {
                key: "DB_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }
        for (key, value) in [
            ("DB_CONNECT_TIMEOUT_MS", self.connect_timeout),
            ("DB_LOOKUP_TIMEOUT_MS", self.lookup_timeout),
            ("REQUEST_TIMEOUT_MS", self.request_timeout),
            ("SESSION_TTL_DAYS", self.session_ttl),
        ] {
            if value.is_zero() {
                return Err(ConfigError::OutOfRange {
                    key,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        if self.session_ttl > Duration::from_secs(MAX_SESSION_TTL_DAYS * SECS_PER_DAY) {
            return Err(session_ttl_too_long());
        }
        if !BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            return Err(ConfigError::OutOfRange {
                key: "BCRYPT_COST",
                reason: format!(
                    "must be between {} and {}",
                    BCRYPT_COST_RANGE.start(),
                    BCRYPT_COST_RANGE.end()
                ),
            });
        }
        Ok(())
    }

    /// `host:port` string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    max_connections: Option<u32>,
    connect_timeout: Option<Duration>,
    lookup_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    jwt_secret: Option<String>,
    session_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
    host: Option<String>,
    port: Option<u16>,
}

impl AppConfigBuilder {
    /// Set the storage URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the pool size
    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = Some(n);
        self
    }

    /// Set the connection establishment timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the existence-check timeout
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    /// Set the overall request deadline
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the session signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the session lifetime
    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = Some(ttl);
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the bind host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the bind port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Build the configuration
    ///
    /// Unset values take their defaults. A missing signing secret falls back
    /// to a development secret in debug builds only.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = match self.jwt_secret {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::MissingValue("JWT_SECRET")),
        };

        let config = AppConfig {
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
            connect_timeout: self
                .connect_timeout
                .unwrap_or(Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS)),
            lookup_timeout: self
                .lookup_timeout
                .unwrap_or(Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS)),
            request_timeout: self
                .request_timeout
                .unwrap_or(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS)),
            jwt_secret,
            session_ttl: self
                .session_ttl
                .unwrap_or(Duration::from_secs(DEFAULT_SESSION_TTL_DAYS * 24 * 60 * 60)),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{key} out of range: {reason}")]
    OutOfRange { key: &'static str, reason: String },
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env_value(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(None),
    }
}

/// `SESSION_TTL_DAYS` as a duration
fn session_ttl_from_days(days: u64) -> Result<Duration, ConfigError> {
    if days > MAX_SESSION_TTL_DAYS {
        return Err(session_ttl_too_long());
    }
    days.checked_mul(SECS_PER_DAY)
        .map(Duration::from_secs)
        .ok_or_else(session_ttl_too_long)
}

fn session_ttl_too_long() -> ConfigError {
    ConfigError::OutOfRange {
        key: "SESSION_TTL_DAYS",
        reason: format!("must be at most {} days", MAX_SESSION_TTL_DAYS),
    }
}
