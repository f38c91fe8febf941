//! Crate-wide error type and `Result` alias.

use thiserror::Error;

/// Errors surfaced by the textpulse library.
///
/// Cache read/write faults are deliberately NOT represented here from the
/// caller's point of view: `ResultCache::get` and `ResultCache::put` absorb
/// storage faults and degrade to misses / dropped writes. Only the explicit
/// maintenance path (`clear_all`) and store construction report
/// [`PulseError::StoreUnavailable`].
#[derive(Debug, Error)]
pub enum PulseError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backing key-value store could not be reached.
    #[error("Backing store unavailable: {0}")]
    StoreUnavailable(String),

    /// The analysis producer failed to return a result.
    #[error("Producer error: {0}")]
    Producer(String),

    /// Input text failed validation (length bounds, emptiness).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PulseError>;
