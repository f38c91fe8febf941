//! Cache purge command handler.

use anyhow::Result;

use textpulse::Config;

use super::build_cache;

/// Handle `textpulse clear`. Unlike reads and writes, a purge against an
/// unreachable store is a hard error: the operator must know whether the
/// entries are actually gone.
pub(crate) async fn cmd_clear(config: &Config) -> Result<()> {
    let cache = build_cache(config).await;
    let removed = cache.clear_all().await?;
    println!("Cleared {} cached result(s).", removed);
    Ok(())
}
