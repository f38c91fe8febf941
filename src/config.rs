//! Configuration loading.
//!
//! Config lives at `~/.textpulse/config.json`. A missing file means
//! defaults; a present file may specify any subset of fields. The
//! `REDIS_URL` environment variable, when set, is tried before the
//! configured store candidates.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_TTL_SECS;
use crate::error::{PulseError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Result cache settings.
    pub cache: CacheConfig,
}

/// Result cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether to attempt a backing-store connection at all.
    pub enabled: bool,
    /// Store candidates tried in order at startup; first reachable wins.
    pub urls: Vec<String>,
    /// Entry lifetime in seconds. 0 means entries never expire.
    pub ttl_seconds: u64,
    /// Per-operation timeout for store round trips, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            urls: vec![
                "redis://localhost:6379".to_string(),
                "redis://redis:6379".to_string(),
                "redis://127.0.0.1:6379".to_string(),
            ],
            ttl_seconds: DEFAULT_TTL_SECS,
            timeout_ms: 2000,
        }
    }
}

impl CacheConfig {
    /// Entry lifetime as a `Duration`, `None` when expiry is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_seconds > 0).then(|| Duration::from_secs(self.ttl_seconds))
    }

    /// Per-operation store timeout.
    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Store candidates with the `REDIS_URL` env override, when set,
    /// prepended.
    pub fn candidate_urls(&self) -> Vec<String> {
        let mut urls = self.urls.clone();
        if let Ok(url) = std::env::var("REDIS_URL") {
            if !url.is_empty() {
                urls.insert(0, url);
            }
        }
        urls
    }
}

impl Config {
    /// Configuration directory: `~/.textpulse`.
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".textpulse")
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::dir().join("config.json"))
    }

    /// Load from an explicit path (missing file → defaults).
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).map_err(|e| {
                PulseError::Config(format!("Failed to parse {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(PulseError::Config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
