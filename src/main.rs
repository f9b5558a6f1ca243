//! Carte main entry point
//!
//! Command-line interface for fetching a single menu URL. HTML content
//! is written to stdout; for PDFs the temp file path is printed and the
//! file is left in place for the caller.

use anyhow::Context;
use carte::config::load_config_with_hash;
use carte::{Config, Fetcher, MenuContent};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Carte: a polite restaurant-menu fetcher
///
/// Fetches menu content (HTML or PDF) from a single URL while
/// respecting robots.txt, per-host rate limits, and retry etiquette.
#[derive(Parser, Debug)]
#[command(name = "carte")]
#[command(version)]
#[command(about = "A polite restaurant-menu fetcher", long_about = None)]
struct Cli {
    /// URL of the menu page to fetch
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file (defaults are used if omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

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

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash);
            config
        }
        None => Config::default(),
    };

    let fetcher = Fetcher::new(config).context("failed to build HTTP client")?;

    match fetcher.try_fetch_menu_content(&cli.url).await {
        Ok(MenuContent::Html(body)) => {
            tracing::info!("Fetched HTML content ({} bytes)", body.len());
            print!("{}", body);
        }
        Ok(MenuContent::Pdf(path)) => {
            tracing::info!("Downloaded PDF to {}", path.display());
            println!("{}", path.display());
        }
        Err(e) => {
            anyhow::bail!("no content could be fetched: {}", e);
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("carte=info,warn"),
            1 => EnvFilter::new("carte=debug,info"),
            2 => EnvFilter::new("carte=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
