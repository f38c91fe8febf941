//! Analysis result data model and caller-side input validation.
//!
//! [`AnalysisResult`] is the value stored in the result cache. Its JSON form
//! must stay readable across deploys: old entries may outlive a schema
//! change, so deserialization tolerates unknown fields (serde default) and a
//! missing `from_cache` field defaults to `false`.

use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};

/// Target number of key phrases per result. Producers pad or truncate to
/// this length; the cache stores whatever the producer hands it.
pub const KEY_PHRASE_TARGET: usize = 3;

/// Minimum accepted input length in characters (after trimming).
pub const MIN_TEXT_LEN: usize = 10;

/// Maximum accepted input length in characters (after trimming).
pub const MAX_TEXT_LEN: usize = 1000;

/// Overall sentiment of an analyzed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => f.write_str("positive"),
            Self::Negative => f.write_str("negative"),
            Self::Neutral => f.write_str("neutral"),
        }
    }
}

/// One completed text analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall sentiment classification.
    pub sentiment: Sentiment,
    /// The most important phrases, padded to [`KEY_PHRASE_TARGET`] by the producer.
    pub key_phrases: Vec<String>,
    /// One-sentence summary of the text.
    pub summary: String,
    /// Producer confidence in [0, 1].
    pub confidence: f64,
    /// Identifier of the analysis path that produced this result.
    pub model_used: String,
    /// Whether this value was served from the cache. Set by the cache layer
    /// at read time — a producer-supplied value is never trusted: `put`
    /// forces it to `false` before storing and `get` forces it to `true`
    /// on a hit.
    #[serde(default)]
    pub from_cache: bool,
}

/// Pad a phrase list to exactly [`KEY_PHRASE_TARGET`] entries.
///
/// Short lists are filled from fixed placeholders; long lists are truncated.
/// Producer-side helper — the cache never reshapes stored phrases.
pub fn pad_key_phrases(mut phrases: Vec<String>) -> Vec<String> {
    const FILLERS: [&str; KEY_PHRASE_TARGET] = ["sample", "test", "phrases"];
    for filler in FILLERS.iter().skip(phrases.len()) {
        phrases.push((*filler).to_string());
    }
    phrases.truncate(KEY_PHRASE_TARGET);
    phrases
}

/// Validate input text length bounds, returning the trimmed slice.
///
/// Trimming happens here exactly once; the trimmed text is what callers must
/// feed to both key derivation and the producer.
pub fn validate_text(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if len < MIN_TEXT_LEN {
        return Err(PulseError::InvalidInput(format!(
            "text must be at least {} characters long (got {})",
            MIN_TEXT_LEN, len
        )));
    }
    if len > MAX_TEXT_LEN {
        return Err(PulseError::InvalidInput(format!(
            "text must be at most {} characters long (got {})",
            MAX_TEXT_LEN, len
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            sentiment: Sentiment::Positive,
            key_phrases: vec!["love".into(), "product".into(), "amazing".into()],
            summary: "This text expresses positive sentiment about love.".into(),
            confidence: 0.9,
            model_used: "heuristic-v1".into(),
            from_cache: false,
        }
    }

    #[test]
    fn test_result_json_roundtrip() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_confidence_precision_roundtrip() {
        let mut result = sample_result();
        result.confidence = 0.123_456_789_012_345_6;
        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.confidence, result.confidence);
    }

    #[test]
    fn test_sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            r#""positive""#
        );
        let parsed: Sentiment = serde_json::from_str(r#""negative""#).unwrap();
        assert_eq!(parsed, Sentiment::Negative);
    }

    #[test]
    fn test_missing_from_cache_defaults_false() {
        // Entry written before the from_cache field existed.
        let json = r#"{
            "sentiment": "neutral",
            "key_phrases": ["a", "b", "c"],
            "summary": "s",
            "confidence": 0.5,
            "model_used": "gpt-3.5-turbo"
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(!result.from_cache);
    }

    #[test]
    fn test_unknown_fields_tolerated() {
        // Entry written by a newer deploy with extra fields.
        let json = r#"{
            "sentiment": "positive",
            "key_phrases": ["a", "b", "c"],
            "summary": "s",
            "confidence": 0.8,
            "model_used": "m",
            "from_cache": false,
            "language": "en",
            "extra_scores": {"joy": 0.3}
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_pad_key_phrases_short() {
        let padded = pad_key_phrases(vec!["only".into()]);
        assert_eq!(padded.len(), KEY_PHRASE_TARGET);
        assert_eq!(padded[0], "only");
    }

    #[test]
    fn test_pad_key_phrases_empty_and_long() {
        assert_eq!(pad_key_phrases(vec![]).len(), KEY_PHRASE_TARGET);
        let long: Vec<String> = (0..6).map(|i| format!("p{i}")).collect();
        assert_eq!(pad_key_phrases(long).len(), KEY_PHRASE_TARGET);
    }

    #[test]
    fn test_validate_text_bounds() {
        assert!(validate_text("too short").is_err());
        assert!(validate_text("   ").is_err());
        assert!(validate_text("this one is long enough").is_ok());
        let too_long = "x".repeat(MAX_TEXT_LEN + 1);
        assert!(validate_text(&too_long).is_err());
    }

    #[test]
    fn test_validate_text_trims() {
        let trimmed = validate_text("   plenty of characters here   ").unwrap();
        assert_eq!(trimmed, "plenty of characters here");
    }
}
