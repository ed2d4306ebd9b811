//! Dead Link Hunter main entry point
//!
//! This is the command-line interface for the dead link crawler.

use anyhow::Context;
use clap::Parser;
use dead_link_hunter::config::{self, load_config_with_hash, Config, Engine};
use dead_link_hunter::output::{print_results, print_statistics, ExportFormat};
use dead_link_hunter::Crawler;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Dead Link Hunter: finds broken links on a website
///
/// Crawls every page reachable from the seed URL on the same domain and
/// reports each link that answers with a status above 299, grouped by the
/// page that contains it.
#[derive(Parser, Debug)]
#[command(name = "dead-link-hunter")]
#[command(version)]
#[command(about = "Finds dead links on a website", long_about = None)]
struct Cli {
    /// URL to start hunting from
    #[arg(short, long)]
    url: String,

    /// Use the static engine (plain HTTP, no JavaScript)
    #[arg(long = "static")]
    static_engine: bool,

    /// Export results to a file
    #[arg(short, long, value_enum)]
    export: Option<ExportFormat>,

    /// Export file name, without extension
    #[arg(short, long, default_value = "result")]
    filename: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum link depth followed (static engine only)
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum number of fetches in flight
    #[arg(long)]
    max_concurrency: Option<u32>,

    /// Fetch timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Print hunt statistics after the results
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if self.static_engine {
            config.crawler.engine = Engine::Static;
        }
        if let Some(max_depth) = self.max_depth {
            config.crawler.max_depth = max_depth;
        }
        if let Some(max_concurrency) = self.max_concurrency {
            config.crawler.max_concurrency = max_concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.crawler.fetch_timeout_secs = timeout;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    config::validate(&config).context("Invalid configuration")?;

    let start = Instant::now();

    let mut crawler = Crawler::new(&cli.url, config)
        .await
        .with_context(|| format!("Failed to start hunting from {}", cli.url))?;
    crawler.start_hunting().await;

    let elapsed = start.elapsed();

    print_results(crawler.get_results());
    println!("\nTotal Hunting Time: {:.2?}", elapsed);

    if cli.stats {
        if let Some(stats) = crawler.statistics() {
            println!();
            print_statistics(stats);
        }
    }

    let exported = match cli.export {
        Some(format) => Some(
            crawler
                .export(format, &cli.filename)
                .with_context(|| format!("Failed to export results as {}", format)),
        ),
        None => None,
    };

    crawler.close().await;

    if let Some(exported) = exported {
        println!("Results exported to {}", exported?.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dead_link_hunter=info,warn"),
            1 => EnvFilter::new("dead_link_hunter=debug,info"),
            2 => EnvFilter::new("dead_link_hunter=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
