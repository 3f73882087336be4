//! doccrawl main entry point
//!
//! This is the command-line interface for the doccrawl documentation crawler.

use clap::Parser;
use doccrawl::config::{load_config_with_hash, load_seeds, Config};
use doccrawl::crawler::crawl;
use doccrawl::output::print_summary;
use doccrawl::storage::{ContentStore, StorageLayout};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// doccrawl: a scoped breadth-first documentation crawler
///
/// Crawls pages reachable from the seed URLs that fall under the allowed
/// roots, storing HTML pages and special-extension files on disk and logging
/// every discovered URL and link.
#[derive(Parser, Debug)]
#[command(name = "doccrawl")]
#[command(version)]
#[command(about = "A scoped breadth-first documentation crawler", long_about = None)]
struct Cli {
    /// File with one seed URL per line
    #[arg(value_name = "SEED_FILE")]
    seed_file: PathBuf,

    /// Stop once this many URLs have been discovered (seeds included)
    #[arg(value_name = "MAX_URLS", value_parser = clap::value_parser!(u64).range(1..))]
    max_urls: u64,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// After the crawl, move directory-style pages to flat files
    #[arg(long)]
    flatten: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    (cfg, Some(hash))
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            (Config::default(), None)
        }
    };

    let seeds = load_seeds(&cli.seed_file)?;
    tracing::info!(
        "Loaded {} seed URLs from {}",
        seeds.len(),
        cli.seed_file.display()
    );

    let max_urls = usize::try_from(cli.max_urls)?;

    let mut summary = match crawl(config.clone(), &seeds, max_urls).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Crawl failed to start: {}", e);
            return Err(e.into());
        }
    };

    summary.config_hash = config_hash;
    print_summary(&summary);

    if cli.flatten {
        handle_flatten(&config)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the crawl summary.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doccrawl=info,warn"),
            1 => EnvFilter::new("doccrawl=debug,info"),
            2 => EnvFilter::new("doccrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --flatten: moves `<name>_.html/index.html` pages to `<name>.html`
fn handle_flatten(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = ContentStore::new(StorageLayout::from_config(&config.output));
    let report = store.flatten_directory_pages()?;

    tracing::info!(
        "Flattened {} directory pages, removed {} empty directories",
        report.moved,
        report.removed_empty
    );

    Ok(())
}
