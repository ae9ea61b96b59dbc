//! In-memory store and connector for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::auth::accounts::{Account, NewAccount};
use crate::backend::db::cache::{ConnectError, Connector};
use crate::backend::db::store::{AccountStore, StoreError};

#[derive(Default)]
struct MemoryInner {
    accounts: Mutex<Vec<Account>>,
    lookups: AtomicUsize,
    inserts: AtomicUsize,
    lookup_error: Mutex<Option<StoreError>>,
    lookup_delay: Mutex<Option<Duration>>,
}

/// Account store kept in a `Vec`, with call counters
///
/// Uniqueness is checked under the same lock as the insert, like a
/// storage UNIQUE constraint.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

impl MemoryStore {
    pub fn lookups(&self) -> usize {
        self.inner.lookups.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inner.inserts.load(Ordering::SeqCst)
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.inner.accounts.lock().unwrap().clone()
    }

    /// Make every following lookup fail with `err`
    pub fn fail_lookups(&self, err: StoreError) {
        *self.inner.lookup_error.lock().unwrap() = Some(err);
    }

    /// Hold every lookup result for `delay` before returning it
    pub fn delay_lookups(&self, delay: Duration) {
        *self.inner.lookup_delay.lock().unwrap() = Some(delay);
    }
}

impl AccountStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        self.inner.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.inner.lookup_error.lock().unwrap().clone() {
            return Err(err);
        }
        let found = self
            .inner
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned();
        let delay = *self.inner.lookup_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        self.inner.lookups.fetch_add(1, Ordering::SeqCst);
        let found = self
            .inner
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned();
        let delay = *self.inner.lookup_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(found)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        self.inner.inserts.fetch_add(1, Ordering::SeqCst);
        let mut accounts = self.inner.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email.eq_ignore_ascii_case(&account.email)) {
            return Err(StoreError::Duplicate);
        }
        let now = Utc::now();
        let created = Account {
            id: account.id,
            email: account.email,
            name: account.name,
            password_hash: account.password_hash,
            role: account.role,
            created_at: now,
            updated_at: now,
        };
        accounts.push(created.clone());
        Ok(created)
    }
}

/// Connector handing out one shared `MemoryStore`
#[derive(Clone, Default)]
pub struct MemoryConnector {
    pub store: MemoryStore,
    connects: Arc<AtomicUsize>,
    refuse: Arc<Mutex<bool>>,
}

impl MemoryConnector {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn set_refusing(&self, refuse: bool) {
        *self.refuse.lock().unwrap() = refuse;
    }
}

impl Connector for MemoryConnector {
    type Handle = MemoryStore;

    async fn connect(&self) -> Result<MemoryStore, ConnectError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if *self.refuse.lock().unwrap() {
            return Err(ConnectError::Refused("memory store refusing".to_string()));
        }
        Ok(self.store.clone())
    }
}
