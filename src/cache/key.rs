//! Content-addressed cache key derivation.
//!
//! A key is `analysis:` followed by the lowercase-hex SHA-256 digest of the
//! UTF-8 bytes of the normalized (caller-trimmed) text. The algorithm is
//! fixed: changing it invalidates every stored entry, so it must never change
//! without a cache-wide purge.

use sha2::{Digest, Sha256};

/// Fixed namespace prefix for every key this crate writes. `clear_all`
/// purges exactly this namespace and nothing else sharing the store.
pub const KEY_NAMESPACE: &str = "analysis:";

/// Storage key for one normalized input text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a normalized text.
    ///
    /// Pure and deterministic: the same string always yields the same key,
    /// across calls and across process restarts. No trimming or case folding
    /// happens here — the caller applies its normalization (surrounding
    /// whitespace removal) once, before calling.
    pub fn for_text(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        Self(format!("{KEY_NAMESPACE}{digest:x}"))
    }

    /// The full namespaced key string sent to the backing store.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
