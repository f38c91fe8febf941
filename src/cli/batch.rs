//! Batch analyze command handler.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use textpulse::{Analyzer, Config, HeuristicProducer, PulseError};

use super::build_cache;

/// Handle `textpulse batch`: one input text per line, skipping blanks.
/// Invalid lines are reported and skipped rather than aborting the run.
pub(crate) async fn cmd_batch(config: &Config, file: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let cache = build_cache(config).await;
    let analyzer = Analyzer::new(cache, Arc::new(HeuristicProducer::new()));

    let mut analyzed = 0usize;
    let mut skipped = 0usize;
    for (lineno, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match analyzer.analyze(line).await {
            Ok(result) => {
                analyzed += 1;
                println!(
                    "{:>5}  {:<8}  {:.2}  {}{}",
                    lineno + 1,
                    result.sentiment.to_string(),
                    result.confidence,
                    result.summary,
                    if result.from_cache { "  [cached]" } else { "" }
                );
            }
            Err(PulseError::InvalidInput(reason)) => {
                skipped += 1;
                eprintln!("{:>5}  skipped: {}", lineno + 1, reason);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let stats = analyzer.cache().stats();
    println!();
    println!(
        "Analyzed {} line(s), skipped {}. Cache: {} hit(s), {} miss(es), hit rate {:.0}%",
        analyzed,
        skipped,
        stats.hits,
        stats.misses,
        stats.hit_rate * 100.0
    );

    Ok(())
}
