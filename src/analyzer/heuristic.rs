//! Keyword-list heuristic producer.
//!
//! Local fallback analysis path for when no remote model is configured:
//! sentiment from fixed positive/negative word lists, key phrases from the
//! first few longer words, and a templated one-sentence summary.

use async_trait::async_trait;

use crate::analysis::{pad_key_phrases, AnalysisResult, Sentiment, KEY_PHRASE_TARGET};
use crate::error::Result;

use super::AnalysisProducer;

const POSITIVE_WORDS: [&str; 5] = ["love", "amazing", "great", "excellent", "awesome"];
const NEGATIVE_WORDS: [&str; 5] = ["hate", "terrible", "awful", "bad", "disappointing"];

/// Words shorter than this are skipped when picking key phrases.
const MIN_PHRASE_WORD_LEN: usize = 4;

/// Model identifier recorded on every result this producer emits.
pub const HEURISTIC_MODEL_ID: &str = "heuristic-v1";

/// Deterministic, dependency-free analysis producer.
#[derive(Debug, Default)]
pub struct HeuristicProducer;

impl HeuristicProducer {
    pub fn new() -> Self {
        Self
    }

    fn classify(text_lower: &str) -> (Sentiment, f64) {
        if POSITIVE_WORDS.iter().any(|w| text_lower.contains(w)) {
            (Sentiment::Positive, 0.9)
        } else if NEGATIVE_WORDS.iter().any(|w| text_lower.contains(w)) {
            (Sentiment::Negative, 0.8)
        } else {
            (Sentiment::Neutral, 0.7)
        }
    }

    fn key_phrases(text: &str) -> Vec<String> {
        let phrases: Vec<String> = text
            .split_whitespace()
            .filter(|w| w.chars().count() >= MIN_PHRASE_WORD_LEN)
            .take(KEY_PHRASE_TARGET)
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|w| !w.is_empty())
            .collect();
        pad_key_phrases(phrases)
    }
}

#[async_trait]
impl AnalysisProducer for HeuristicProducer {
    async fn produce(&self, text: &str) -> Result<AnalysisResult> {
        let (sentiment, confidence) = Self::classify(&text.to_lowercase());
        let key_phrases = Self::key_phrases(text);
        let summary = format!(
            "This text expresses {} sentiment about {}.",
            sentiment, key_phrases[0]
        );

        Ok(AnalysisResult {
            sentiment,
            key_phrases,
            summary,
            confidence,
            model_used: HEURISTIC_MODEL_ID.to_string(),
            from_cache: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn produce(text: &str) -> AnalysisResult {
        HeuristicProducer::new().produce(text).await.unwrap()
    }

    #[tokio::test]
    async fn test_positive_keywords() {
        let result = produce("What an amazing day at the beach").await;
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.model_used, HEURISTIC_MODEL_ID);
    }

    #[tokio::test]
    async fn test_negative_keywords_case_insensitive() {
        let result = produce("That was a TERRIBLE idea from the start").await;
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.confidence, 0.8);
    }

    #[tokio::test]
    async fn test_neutral_default() {
        let result = produce("The meeting is scheduled for Thursday morning").await;
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.confidence, 0.7);
    }

    #[tokio::test]
    async fn test_key_phrases_padded_to_target() {
        // Only one word passes the length filter; fillers make up the rest.
        let result = produce("it is so good to be me").await;
        assert_eq!(result.key_phrases.len(), KEY_PHRASE_TARGET);
        assert_eq!(result.key_phrases[0], "good");
    }

    #[tokio::test]
    async fn test_key_phrases_strip_punctuation() {
        let result = produce("I absolutely love this product, it's amazing!").await;
        assert_eq!(result.key_phrases.len(), KEY_PHRASE_TARGET);
        assert!(result.key_phrases.iter().all(|p| !p.ends_with(',')));
    }

    #[tokio::test]
    async fn test_summary_mentions_sentiment_and_phrase() {
        let result = produce("What an excellent concert that was tonight").await;
        assert!(result.summary.contains("positive"));
        assert!(result.summary.contains(&result.key_phrases[0]));
    }

    #[tokio::test]
    async fn test_deterministic_output() {
        let a = produce("a thoroughly unremarkable sentence for testing").await;
        let b = produce("a thoroughly unremarkable sentence for testing").await;
        assert_eq!(a, b);
    }
}
