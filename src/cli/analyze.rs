//! Single-text analyze command handler.

use std::sync::Arc;

use anyhow::Result;

use textpulse::{Analyzer, Config, HeuristicProducer};

use super::build_cache;

/// Handle `textpulse analyze`.
pub(crate) async fn cmd_analyze(config: &Config, text: &str, json: bool) -> Result<()> {
    let cache = build_cache(config).await;
    let analyzer = Analyzer::new(cache, Arc::new(HeuristicProducer::new()));

    let result = analyzer.analyze(text).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Sentiment:   {}", result.sentiment);
    println!("Confidence:  {:.2}", result.confidence);
    println!("Key phrases: {}", result.key_phrases.join(", "));
    println!("Summary:     {}", result.summary);
    println!("Model:       {}", result.model_used);
    println!(
        "Source:      {}",
        if result.from_cache { "cache" } else { "fresh" }
    );

    Ok(())
}
