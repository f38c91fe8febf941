//! Command-line interface: argument definitions and shared wiring.

mod analyze;
mod batch;
mod clear;
mod status;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use textpulse::cache::connect_first_reachable;
use textpulse::{Config, ResultCache};

pub(crate) use analyze::cmd_analyze;
pub(crate) use batch::cmd_batch;
pub(crate) use clear::cmd_clear;
pub(crate) use status::cmd_status;

#[derive(Parser)]
#[command(name = "textpulse", version, about = "Text analysis with a Redis-backed result cache")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Analyze a single text and print the result
    Analyze {
        /// The text to analyze (10 to 1000 characters)
        text: String,
        /// Print the raw JSON result instead of the formatted view
        #[arg(long)]
        json: bool,
    },
    /// Analyze one text per line from a file, then print cache statistics
    Batch {
        /// Path to a UTF-8 file with one input text per line
        file: std::path::PathBuf,
    },
    /// Remove every cached analysis result
    Clear,
    /// Show backing store reachability and cache configuration
    Status,
}

/// Build the result cache from config: try the store candidates in order,
/// fall back to disconnected (always-miss) mode when none answers.
pub(crate) async fn build_cache(config: &Config) -> Arc<ResultCache> {
    if !config.cache.enabled {
        return Arc::new(ResultCache::disconnected());
    }
    match connect_first_reachable(&config.cache.candidate_urls(), config.cache.op_timeout()).await
    {
        Some(store) => Arc::new(ResultCache::new(Arc::new(store), config.cache.ttl())),
        None => Arc::new(ResultCache::disconnected()),
    }
}
