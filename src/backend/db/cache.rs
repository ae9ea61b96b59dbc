/**
 * Connection Cache
 *
 * Lazily establishes the storage handle and shares it with every request
 * handler for the life of the process.
 *
 * # States
 *
 * ```text
 * Empty ──get()──▶ Connecting ──ok──▶ Connected
 *   ▲                  │                  │
 *   └──── failure ─────┘                  │
 *   └────────────── invalidate() ─────────┘
 * ```
 *
 * # Single-flight
 *
 * There is one pending-attempt slot. Callers that arrive while an attempt
 * is in flight await that same attempt (a `Shared` future) instead of
 * starting their own. A caller that gives up waiting does not cancel the
 * attempt for the others. When the attempt fails the slot is cleared, so
 * the next `get()` starts over, and every waiter sees the same error.
 *
 * Establishment is bounded by the connect timeout. Exceeding it is reported
 * as `ConnectError::Timeout`, distinct from `ConnectError::Refused`.
 */
use std::future::Future;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;

/// Failure to establish a storage handle
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// Establishment did not finish within the connect timeout
    #[error("connection attempt timed out after {0:?}")]
    Timeout(Duration),

    /// The store could not be reached or rejected the connection
    #[error("connection refused: {0}")]
    Refused(String),

    /// Connected, but preparing the store (migrations) failed
    #[error("store setup failed: {0}")]
    Setup(String),
}

/// Establishes storage handles for a `ConnectionCache`
///
/// Implemented by `SqliteConnector` in production and by fakes in tests.
pub trait Connector: Clone + Send + Sync + 'static {
    /// The established handle, cheap to clone and shared by all callers
    type Handle: Clone + Send + Sync + 'static;

    /// Open a new handle. Called at most once per establishment attempt.
    fn connect(&self) -> impl Future<Output = Result<Self::Handle, ConnectError>> + Send;
}

type PendingConnect<H> = Shared<BoxFuture<'static, Result<H, ConnectError>>>;

enum Slot<H> {
    Empty,
    Connecting {
        generation: u64,
        pending: PendingConnect<H>,
    },
    Connected {
        generation: u64,
        handle: H,
    },
}

struct CacheState<H> {
    slot: Slot<H>,
    last_generation: u64,
}

/// A handle obtained from the cache
///
/// Remembers which establishment attempt produced it, so a late failure
/// report about an old handle cannot discard a newer one.
#[derive(Clone, Debug)]
pub struct CachedConnection<H> {
    generation: u64,
    handle: H,
}

impl<H> CachedConnection<H> {
    /// Establishment attempt this handle came from (starts at 1)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }
}

impl<H> Deref for CachedConnection<H> {
    type Target = H;

    fn deref(&self) -> &H {
        &self.handle
    }
}

/// Process-wide storage connection cache
///
/// Owned by `AppState` and injected into handlers; never a global.
pub struct ConnectionCache<C: Connector> {
    connector: C,
    connect_timeout: Duration,
    state: Mutex<CacheState<C::Handle>>,
    attempts: AtomicU64,
}

impl<C: Connector> ConnectionCache<C> {
    /// Create an empty cache. Nothing is established until the first `get()`.
    pub fn new(connector: C, connect_timeout: Duration) -> Self {
        Self {
            connector,
            connect_timeout,
            state: Mutex::new(CacheState {
                slot: Slot::Empty,
                last_generation: 0,
            }),
            attempts: AtomicU64::new(0),
        }
    }

    /// Get the shared handle, establishing it if needed
    ///
    /// # Returns
    ///
    /// - The cached handle if one is established
    /// - The result of the in-flight attempt if one is running
    /// - Otherwise the result of a new attempt started by this call
    ///
    /// # Errors
    ///
    /// `ConnectError` from the attempt this call waited on. The error is not
    /// retried here; the next call starts a fresh attempt.
    pub async fn get(&self) -> Result<CachedConnection<C::Handle>, ConnectError> {
        let (generation, pending) = {
            let mut state = self.lock();

            let joined = match &state.slot {
                Slot::Connected { generation, handle } => {
                    return Ok(CachedConnection {
                        generation: *generation,
                        handle: handle.clone(),
                    });
                }
                Slot::Connecting {
                    generation,
                    pending,
                } => Some((*generation, pending.clone())),
                Slot::Empty => None,
            };

            match joined {
                Some(joined) => joined,
                None => {
                    state.last_generation += 1;
                    let generation = state.last_generation;
                    let pending = self.start_attempt(generation);
                    state.slot = Slot::Connecting {
                        generation,
                        pending: pending.clone(),
                    };
                    (generation, pending)
                }
            }
        };

        let outcome = pending.await;

        let mut state = self.lock();
        let still_current = matches!(
            &state.slot,
            Slot::Connecting { generation: g, .. } if *g == generation
        );

        match outcome {
            Ok(handle) => {
                if still_current {
                    tracing::info!(generation, "Storage connection established");
                    state.slot = Slot::Connected {
                        generation,
                        handle: handle.clone(),
                    };
                }
                Ok(CachedConnection { generation, handle })
            }
            Err(err) => {
                if still_current {
                    tracing::error!(generation, error = %err, "Storage connection failed");
                    state.slot = Slot::Empty;
                }
                Err(err)
            }
        }
    }

    /// Report a handle as unusable
    ///
    /// Discards the cached handle if `conn` is still the current one and
    /// returns `true`. Reports about an older handle are ignored.
    pub fn invalidate(&self, conn: &CachedConnection<C::Handle>) -> bool {
        let mut state = self.lock();
        let is_current = matches!(
            &state.slot,
            Slot::Connected { generation, .. } if *generation == conn.generation
        );
        if is_current {
            tracing::warn!(
                generation = conn.generation,
                "Discarding storage connection after reported failure"
            );
            state.slot = Slot::Empty;
        }
        is_current
    }

    /// Whether a handle is currently established (does not connect)
    pub fn is_connected(&self) -> bool {
        matches!(self.lock().slot, Slot::Connected { .. })
    }

    /// Number of establishment attempts started so far
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    fn start_attempt(&self, generation: u64) -> PendingConnect<C::Handle> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        let connector = self.connector.clone();
        let timeout = self.connect_timeout;

        async move {
            tracing::debug!(generation, ?timeout, "Establishing storage connection");
            match tokio::time::timeout(timeout, connector.connect()).await {
                Ok(result) => result,
                Err(_) => Err(ConnectError::Timeout(timeout)),
            }
        }
        .boxed()
        .shared()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState<C::Handle>> {
        // The state is a plain enum swap; a panic elsewhere cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
