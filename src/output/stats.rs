//! Statistics for a finished crawl
//!
//! This module provides the summary numbers printed after a hunt.

use crate::state::{DeadLinkReport, LedgerSummary};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// Wall-clock time the crawl took
    pub elapsed: Duration,

    /// Number of URLs whose evaluation finished
    pub pages_visited: usize,

    /// Number of distinct URLs classified dead
    pub dead_urls: usize,

    /// Number of URLs that could not be evaluated (network error or timeout)
    pub inconclusive_urls: usize,

    /// Number of pages containing at least one dead link
    pub referrers: usize,

    /// Number of dead edges (a dead URL counts once per referring page)
    pub dead_links: usize,
}

impl CrawlStatistics {
    /// Builds statistics from the ledger counts and the final report
    pub fn new(
        started_at: DateTime<Utc>,
        elapsed: Duration,
        summary: &LedgerSummary,
        report: &DeadLinkReport,
    ) -> Self {
        Self {
            started_at,
            elapsed,
            pages_visited: summary.visited(),
            dead_urls: summary.dead,
            inconclusive_urls: summary.inconclusive,
            referrers: report.len(),
            dead_links: report.total_dead_links(),
        }
    }

    /// Returns the share of visited URLs that were dead, as a percentage
    pub fn dead_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.dead_urls as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Hunt Statistics ===\n");

    println!("  Started at: {}", stats.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Pages visited: {}", stats.pages_visited);
    println!(
        "  Dead URLs: {} ({:.1}%)",
        stats.dead_urls,
        stats.dead_rate()
    );
    println!("  Inconclusive URLs: {}", stats.inconclusive_urls);
    println!(
        "  Dead links: {} across {} pages",
        stats.dead_links, stats.referrers
    );
    println!();
}
