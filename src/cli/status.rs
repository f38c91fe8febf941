//! Store status command handler.

use anyhow::Result;

use textpulse::cache::{KeyValueStore, RedisStore};
use textpulse::Config;

/// Handle `textpulse status`: probe each store candidate and show the
/// effective cache configuration.
pub(crate) async fn cmd_status(config: &Config) -> Result<()> {
    println!("Cache enabled: {}", config.cache.enabled);
    match config.cache.ttl() {
        Some(ttl) => println!("Entry TTL:     {}s", ttl.as_secs()),
        None => println!("Entry TTL:     none (entries persist until cleared)"),
    }
    println!();

    println!("{:<32} {}", "Store candidate", "Status");
    println!("{}", "-".repeat(44));
    for url in config.cache.candidate_urls() {
        let status = match RedisStore::new(&url, config.cache.op_timeout()) {
            Ok(store) => match store.ping().await {
                Ok(()) => "reachable".to_string(),
                Err(e) => format!("unreachable ({})", e),
            },
            Err(e) => format!("invalid ({})", e),
        };
        println!("{:<32} {}", url, status);
    }

    Ok(())
}
