//! Database Module
//!
//! Storage access for the account service.
//!
//! # Module Structure
//!
//! ```text
//! db/
//! ├── mod.rs     - Module exports
//! ├── cache.rs   - Lazily established, single-flight connection cache
//! ├── store.rs   - AccountStore trait and StoreError
//! └── sqlite.rs  - SQLite connector, store and embedded migrations
//! ```
//!
//! Handlers never open connections themselves. They ask the
//! `ConnectionCache` held in `AppState` for the shared handle and report it
//! back with `invalidate` when the store stops answering.

/// Connection cache
pub mod cache;

/// Storage trait
pub mod store;

/// SQLite implementation
pub mod sqlite;

pub use cache::{CachedConnection, ConnectError, ConnectionCache, Connector};
pub use sqlite::{SqliteConnector, SqliteStore};
pub use store::{discard_if_unavailable, AccountStore, StoreError};

#[cfg(test)]
pub mod testing;
