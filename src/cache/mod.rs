//! Content-addressed caching of analysis results over a shared key-value store.

pub mod key;
pub mod result_cache;
pub mod store;

pub use key::{CacheKey, KEY_NAMESPACE};
pub use result_cache::{CacheStats, ResultCache, DEFAULT_TTL_SECS};
pub use store::{connect_first_reachable, KeyValueStore, MemoryStore, RedisStore};
