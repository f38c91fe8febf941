//! Content-addressed cache for analysis results.
//!
//! The cache is an optimization, never a dependency: every read/write-path
//! storage fault is absorbed (a miss, a dropped write) and logged, so the
//! worst user-visible outcome of a dead store is recomputation. The one
//! exception is [`ResultCache::clear_all`] — an explicit maintenance
//! operation whose failure the caller must see.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::analysis::AnalysisResult;
use crate::error::{PulseError, Result};

use super::key::{CacheKey, KEY_NAMESPACE};
use super::store::KeyValueStore;

/// Default entry lifetime: one hour. Matches the original deployment's
/// fixed-expiry policy. A TTL of zero disables expiry entirely.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Process-wide hit/miss counters, read via [`ResultCache::stats`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    /// Completed `get` calls that returned a stored result.
    pub hits: u64,
    /// Completed `get` calls that returned absent (including unreadable
    /// entries and unreachable-store degradation).
    pub misses: u64,
    /// `hits / (hits + misses)`, 0.0 when no `get` has completed yet.
    pub hit_rate: f64,
}

/// Result cache over a shared key-value store.
///
/// Stored values are immutable once written: the same key is only ever
/// re-written with an equivalent freshly computed result (concurrent writers
/// race with last-write-wins, which is acceptable because results for the
/// same normalized input are interchangeable). Counters live in process
/// memory and reset on restart.
pub struct ResultCache {
    store: Option<Arc<dyn KeyValueStore>>,
    ttl: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    /// Create a cache over `store` with the given entry lifetime.
    ///
    /// `ttl = None` (or a zero duration) means entries persist until an
    /// explicit [`ResultCache::clear_all`].
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Option<Duration>) -> Self {
        Self {
            store: Some(store),
            ttl: ttl.filter(|d| !d.is_zero()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Create a cache with no backing store: every `get` misses, every
    /// `put` is dropped, and `clear_all` fails. Used when no store
    /// candidate was reachable at startup.
    pub fn disconnected() -> Self {
        Self {
            store: None,
            ttl: None,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Whether a backing store is attached.
    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    /// Look up a previously stored result.
    ///
    /// Returns `None` for a genuine miss, an unreachable store, or an entry
    /// that no longer deserializes — none of those are observable as errors.
    /// On a hit the returned record has `from_cache` forced to `true`,
    /// overriding whatever was stored. Exactly one of the hit/miss counters
    /// is incremented per call, after the outcome is determined.
    pub async fn get(&self, key: &CacheKey) -> Option<AnalysisResult> {
        match self.lookup(key).await {
            Some(mut result) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                result.from_cache = true;
                debug!(key = %key, "Cache hit");
                Some(result)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache miss");
                None
            }
        }
    }

    /// Store a freshly computed result under `key`. Best-effort: an
    /// unreachable store drops the write with a warning, never an error —
    /// the caller still holds the value and returns it regardless.
    ///
    /// The stored form always carries `from_cache = false`; read time is
    /// where the true flag gets applied.
    pub async fn put(&self, key: &CacheKey, result: &AnalysisResult) {
        let Some(store) = &self.store else {
            debug!(key = %key, "No backing store; dropping cache write");
            return;
        };

        let mut stored = result.clone();
        stored.from_cache = false;
        let bytes = match serde_json::to_vec(&stored) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key = %key, "Failed to serialize result for caching: {}", e);
                return;
            }
        };

        match store.set(key.as_str(), &bytes, self.ttl).await {
            Ok(()) => debug!(key = %key, ttl = ?self.ttl, "Cached analysis result"),
            Err(e) => warn!(key = %key, "Cache write dropped: {}", e),
        }
    }

    /// Remove every entry under the `analysis:` namespace, leaving unrelated
    /// keys in the shared store untouched. Returns the number removed
    /// (0 is a valid result).
    ///
    /// Unlike `get`/`put`, an unreachable store is an error here: the caller
    /// asked for a purge and needs to know whether it happened.
    pub async fn clear_all(&self) -> Result<u64> {
        let store = self.store.as_ref().ok_or_else(|| {
            PulseError::StoreUnavailable("no backing store connected".to_string())
        })?;
        let pattern = format!("{KEY_NAMESPACE}*");
        let removed = store.delete_matching(&pattern).await?;
        debug!(removed, "Cleared cached analysis results");
        Ok(removed)
    }

    /// Snapshot of the process-local counters.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
        }
    }

    /// The raw lookup, outcome not yet counted. Any fault collapses to `None`.
    async fn lookup(&self, key: &CacheKey) -> Option<AnalysisResult> {
        let store = self.store.as_ref()?;
        let bytes = match store.get(key.as_str()).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, "Cache read error, treating as miss: {}", e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(key = %key, "Corrupt cache entry, treating as miss: {}", e);
                None
            }
        }
    }
}
