//! TextPulse — text analysis with a content-addressed result cache.
//!
//! The core of the crate is [`cache::ResultCache`]: a cache over a shared
//! Redis-compatible key-value store that maps normalized input text (via a
//! SHA-256 digest key) to a previously computed [`analysis::AnalysisResult`],
//! so the costly analysis call never runs twice for the same input. The
//! cache degrades gracefully — an unreachable or corrupt store turns into
//! misses and dropped writes, never into caller-visible errors.
//!
//! [`analyzer::Analyzer`] wires the cache to an [`analyzer::AnalysisProducer`]
//! implementation; the shipped producer is a local keyword heuristic.

pub mod analysis;
pub mod analyzer;
pub mod cache;
pub mod config;
pub mod error;

pub use analysis::{AnalysisResult, Sentiment};
pub use analyzer::{AnalysisProducer, Analyzer, HeuristicProducer};
pub use cache::{CacheKey, CacheStats, ResultCache};
pub use config::{CacheConfig, Config};
pub use error::{PulseError, Result};
