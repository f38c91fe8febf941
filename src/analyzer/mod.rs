//! Analysis orchestration: validate, normalize, consult the cache, produce.
//!
//! The producer behind [`AnalysisProducer`] is a collaborator — the shipped
//! implementation is the keyword heuristic in [`heuristic`]; a remote LLM
//! producer plugs into the same seam.

pub mod heuristic;

use std::sync::Arc;

use async_trait::async_trait;

use crate::analysis::{validate_text, AnalysisResult};
use crate::cache::{CacheKey, ResultCache};
use crate::error::Result;

pub use heuristic::HeuristicProducer;

/// Computes a fresh [`AnalysisResult`] for a normalized text.
///
/// Implementations are responsible for padding `key_phrases` to the target
/// length and for setting `model_used`; they must leave `from_cache` alone
/// (the cache layer owns that flag).
#[async_trait]
pub trait AnalysisProducer: Send + Sync {
    /// Analyze `text` (already trimmed by the caller).
    async fn produce(&self, text: &str) -> Result<AnalysisResult>;
}

/// Ties the cache and a producer together into the analyze flow.
pub struct Analyzer {
    cache: Arc<ResultCache>,
    producer: Arc<dyn AnalysisProducer>,
}

impl Analyzer {
    pub fn new(cache: Arc<ResultCache>, producer: Arc<dyn AnalysisProducer>) -> Self {
        Self { cache, producer }
    }

    /// The cache shared by this analyzer, for stats and maintenance.
    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Analyze a text, serving from the cache when possible.
    ///
    /// Validates length bounds, trims surrounding whitespace once, and uses
    /// the trimmed text for both key derivation and production. Cache hits
    /// come back with `from_cache = true`; fresh results with `false`. A
    /// failed cache write does not fail the call — the fresh result is
    /// returned regardless.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let text = validate_text(text)?;
        let key = CacheKey::for_text(text);

        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let result = self.producer.produce(text).await?;
        self.cache.put(&key, &result).await;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Sentiment, KEY_PHRASE_TARGET};
    use crate::cache::MemoryStore;
    use crate::error::PulseError;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Producer that counts invocations, to prove hits skip production.
    struct CountingProducer {
        inner: HeuristicProducer,
        calls: AtomicU64,
    }

    #[async_trait]
    impl AnalysisProducer for CountingProducer {
        async fn produce(&self, text: &str) -> Result<AnalysisResult> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.inner.produce(text).await
        }
    }

    fn analyzer() -> (Arc<CountingProducer>, Analyzer) {
        let cache = Arc::new(ResultCache::new(Arc::new(MemoryStore::new()), None));
        let producer = Arc::new(CountingProducer {
            inner: HeuristicProducer::new(),
            calls: AtomicU64::new(0),
        });
        (producer.clone(), Analyzer::new(cache, producer))
    }

    #[tokio::test]
    async fn test_miss_then_hit_scenario() {
        let (producer, analyzer) = analyzer();
        let text = "I absolutely love this product, it's amazing!";

        let first = analyzer.analyze(text).await.unwrap();
        assert!(!first.from_cache);
        assert_eq!(first.sentiment, Sentiment::Positive);
        assert_eq!(first.key_phrases.len(), KEY_PHRASE_TARGET);

        let second = analyzer.analyze(text).await.unwrap();
        assert!(second.from_cache);
        assert_eq!(second.sentiment, first.sentiment);
        assert_eq!(second.key_phrases, first.key_phrases);
        assert_eq!(second.summary, first.summary);
        assert_eq!(second.confidence, first.confidence);

        assert_eq!(producer.calls.load(Ordering::Relaxed), 1);
        let stats = analyzer.cache().stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[tokio::test]
    async fn test_trim_applied_before_keying() {
        let (producer, analyzer) = analyzer();

        analyzer
            .analyze("a text with surrounding spaces")
            .await
            .unwrap();
        let hit = analyzer
            .analyze("   a text with surrounding spaces   ")
            .await
            .unwrap();

        assert!(hit.from_cache, "trimmed variants share one cache entry");
        assert_eq!(producer.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_rejects_out_of_bounds_text() {
        let (_, analyzer) = analyzer();
        assert!(matches!(
            analyzer.analyze("short").await,
            Err(PulseError::InvalidInput(_))
        ));
        assert!(matches!(
            analyzer.analyze(&"y".repeat(2000)).await,
            Err(PulseError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_disconnected_cache_still_analyzes() {
        let producer = Arc::new(HeuristicProducer::new());
        let analyzer = Analyzer::new(Arc::new(ResultCache::disconnected()), producer);

        let result = analyzer
            .analyze("this terrible experience was awful and disappointing")
            .await
            .unwrap();
        assert!(!result.from_cache);
        assert_eq!(result.sentiment, Sentiment::Negative);
    }
}
