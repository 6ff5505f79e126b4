//! Krisha-Scout main entry point
//!
//! This is the command-line interface for the Krisha-Scout listing scraper.

use anyhow::Context;
use clap::Parser;
use krisha_scout::config::{load_config_with_hash, Config};
use krisha_scout::crawler::Coordinator;
use krisha_scout::logging::{build_dispatch, build_filter};
use krisha_scout::prompt::prompt_rooms;
use std::path::{Path, PathBuf};
use tracing::instrument::WithSubscriber;

/// Krisha-Scout: a polite apartment listing scraper
///
/// Walks the apartment-sale catalog of one city page by page and saves every
/// listing to a semicolon-delimited CSV file.
#[derive(Parser, Debug)]
#[command(name = "krisha-scout")]
#[command(version = "1.0.0")]
#[command(about = "A polite apartment listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Room-count filter; skips the interactive question
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rooms: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let log_path = Path::new(&config.output.log_path);
    let (dispatch, _guard) = build_dispatch(log_path, build_filter(cli.verbose, cli.quiet))
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    if !cli.quiet {
        println!("🏠 Krisha-Scout | {}", config.site.city_name);
    }

    let rooms = match cli.rooms {
        Some(rooms) => Some(rooms),
        None => prompt_rooms(std::io::stdin().lock(), std::io::stdout())
            .context("Failed to read the room count")?,
    };

    run(config, config_hash, rooms)
        .with_subscriber(dispatch)
        .await
}

/// Handles the main crawl operation
async fn run(config: Config, config_hash: Option<String>, rooms: Option<u32>) -> anyhow::Result<()> {
    match config_hash {
        Some(hash) => tracing::info!("Configuration loaded (hash: {})", hash),
        None => tracing::info!("Using built-in configuration"),
    }

    let mut coordinator = Coordinator::new(&config)?;
    match coordinator.run(rooms).await {
        Ok(report) => {
            tracing::info!(
                "🏁 FINISH | Records: {} | State: {}",
                report.outcome.records(),
                report.final_state
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
