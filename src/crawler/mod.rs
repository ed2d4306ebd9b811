//! Crawler module for page fetching and link traversal
//!
//! This module contains the core hunting logic, including:
//! - The fetch engines (static HTTP and headless browser)
//! - HTML parsing and anchor extraction
//! - Recursive traversal with coalescing and a concurrency cap
//! - Overall hunt coordination

mod browser;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use browser::DynamicFetcher;
pub use coordinator::Crawler;
pub use fetcher::{build_http_client, probe_head, FetchError, FetchResult, Fetcher, StaticFetcher};
pub use parser::extract_hrefs;
pub use scheduler::{CrawlOutcome, Scheduler};

use crate::config::Config;
use crate::state::DeadLinkReport;

/// Runs a complete hunt and returns its results
///
/// This is the shortest way to use the crate. It will:
/// 1. Validate the seed and configuration
/// 2. Start the configured fetch engine
/// 3. Crawl until every discovered in-scope link has been evaluated
/// 4. Shut the engine down
///
/// # Arguments
///
/// * `seed` - The URL the hunt starts from
/// * `config` - The hunt configuration
///
/// # Returns
///
/// * `Ok(DeadLinkReport)` - Dead links grouped by referrer
/// * `Err(HunterError)` - The hunt could not start
pub async fn hunt(seed: &str, config: Config) -> crate::Result<DeadLinkReport> {
    let mut crawler = Crawler::new(seed, config).await?;
    crawler.start_hunting().await;
    let results = crawler.get_results().clone();
    crawler.close().await;
    Ok(results)
}
