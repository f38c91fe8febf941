//! TextPulse CLI entry point.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use textpulse::Config;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let config = Config::load()?;

    match args.command {
        Commands::Analyze { text, json } => cli::cmd_analyze(&config, &text, json).await,
        Commands::Batch { file } => cli::cmd_batch(&config, &file).await,
        Commands::Clear => cli::cmd_clear(&config).await,
        Commands::Status => cli::cmd_status(&config).await,
    }
}
