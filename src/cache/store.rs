//! Backing key-value store abstraction and its implementations.
//!
//! The result cache only needs four store operations: GET, SET (with
//! optional expiry), delete-by-pattern, and a liveness PING. [`RedisStore`]
//! is the production backend; [`MemoryStore`] backs tests and no-Redis
//! development.

use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{info, warn};

use crate::error::{PulseError, Result};

/// Minimal key-value store surface required by the result cache.
///
/// Implementations report transport faults as
/// [`PulseError::StoreUnavailable`]; the caller decides whether the fault is
/// absorbed (read/write path) or surfaced (maintenance path).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw bytes stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, expiring after `ttl` when given.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Delete every key matching `pattern` (glob-style, e.g. `analysis:*`).
    /// Returns the number of keys removed.
    async fn delete_matching(&self, pattern: &str) -> Result<u64>;

    /// Liveness check.
    async fn ping(&self) -> Result<()>;
}

// ============================================================================
// Redis backend
// ============================================================================

/// Redis-backed store.
///
/// Opens a multiplexed async connection per operation and wraps every round
/// trip (including connection setup) in `op_timeout`, so a degraded store
/// surfaces as a prompt `StoreUnavailable` instead of stalling request
/// handling.
pub struct RedisStore {
    client: redis::Client,
    url: String,
    op_timeout: Duration,
}

impl RedisStore {
    /// Create a store for the given `redis://` URL.
    ///
    /// Only validates the URL; no connection is made until the first
    /// operation (or [`RedisStore::ping`]).
    pub fn new(url: &str, op_timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| PulseError::Config(format!("invalid redis URL {url}: {e}")))?;
        Ok(Self {
            client,
            url: url.to_string(),
            op_timeout,
        })
    }

    /// The connection URL this store was built with.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        self.with_timeout(self.client.get_multiplexed_async_connection())
            .await
    }

    /// Await a redis future under the configured operation timeout, folding
    /// both timeout and transport errors into `StoreUnavailable`.
    async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = redis::RedisResult<T>> + Send,
    ) -> Result<T> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(PulseError::StoreUnavailable(format!("{}: {e}", self.url))),
            Err(_) => Err(PulseError::StoreUnavailable(format!(
                "{}: timed out after {:?}",
                self.url, self.op_timeout
            ))),
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let value: Option<Vec<u8>> = self.with_timeout(conn.get(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;
        match ttl {
            Some(ttl) if ttl.as_secs() > 0 => {
                let _: () = self
                    .with_timeout(conn.set_ex(key, value, ttl.as_secs()))
                    .await?;
            }
            _ => {
                let _: () = self.with_timeout(conn.set(key, value)).await?;
            }
        }
        Ok(())
    }

    async fn delete_matching(&self, pattern: &str) -> Result<u64> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = self.with_timeout(conn.keys(pattern)).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        let removed: u64 = self.with_timeout(conn.del(&keys)).await?;
        Ok(removed)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let pong: String = self
            .with_timeout(redis::cmd("PING").query_async(&mut conn))
            .await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(PulseError::StoreUnavailable(format!(
                "{}: unexpected PING reply {pong:?}",
                self.url
            )))
        }
    }
}

/// Try each candidate URL in order and return the first store that answers
/// PING within `op_timeout`. Returns `None` when no candidate is reachable,
/// in which case the cache runs in always-miss mode.
pub async fn connect_first_reachable(urls: &[String], op_timeout: Duration) -> Option<RedisStore> {
    for url in urls {
        let store = match RedisStore::new(url, op_timeout) {
            Ok(store) => store,
            Err(e) => {
                warn!(url = %url, "Skipping backing store candidate: {}", e);
                continue;
            }
        };
        match store.ping().await {
            Ok(()) => {
                info!(url = %url, "Connected to backing store");
                return Some(store);
            }
            Err(e) => {
                warn!(url = %url, "Backing store candidate unreachable: {}", e);
            }
        }
    }
    warn!("No backing store reachable; caching disabled (every lookup will miss)");
    None
}

// ============================================================================
// In-memory backend
// ============================================================================

/// In-process store backed by a `HashMap`.
///
/// Honors TTLs via per-entry deadlines checked on read. Supports the one
/// pattern shape the cache uses (`prefix*`) in [`MemoryStore::delete_matching`].
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredValue>>,
}

struct StoredValue {
    bytes: Vec<u8>,
    expires_at: Option<Instant>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .expect("memory store lock poisoned")
            .values()
            .filter(|v| v.expires_at.map_or(true, |at| at > now))
            .count()
    }

    /// Returns `true` if the store holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().expect("memory store lock poisoned");
        Ok(entries.get(key).and_then(|v| {
            match v.expires_at {
                Some(at) if at <= Instant::now() => None,
                _ => Some(v.bytes.clone()),
            }
        }))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        let mut entries = self.entries.write().expect("memory store lock poisoned");
        entries.insert(
            key.to_string(),
            StoredValue {
                bytes: value.to_vec(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete_matching(&self, pattern: &str) -> Result<u64> {
        let prefix = pattern.strip_suffix('*').unwrap_or(pattern);
        let mut entries = self.entries.write().expect("memory store lock poisoned");
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - entries.len()) as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
