//! Crawler coordinator - hunt orchestration
//!
//! This module contains the public entry point of a hunt:
//! - Validating the seed URL and configuration
//! - Choosing and starting the fetch engine
//! - Running the scheduler to completion
//! - Keeping the results and statistics for the caller
//! - Shutting the engine down

use crate::config::{self, Config, Engine};
use crate::crawler::browser::DynamicFetcher;
use crate::crawler::fetcher::{Fetcher, StaticFetcher};
use crate::crawler::scheduler::Scheduler;
use crate::output::{export_results, CrawlStatistics, ExportFormat};
use crate::state::DeadLinkReport;
use crate::url::{normalize_target, CrawlScope};
use crate::HunterError;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// A dead link hunt rooted at one seed URL
pub struct Crawler {
    seed: String,
    scope: CrawlScope,
    config: Config,
    fetcher: Arc<dyn Fetcher>,
    results: DeadLinkReport,
    statistics: Option<CrawlStatistics>,
}

impl Crawler {
    /// Creates a crawler and starts the engine selected in `config`
    ///
    /// # Arguments
    ///
    /// * `seed` - The URL the hunt starts from
    /// * `config` - The hunt configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to hunt
    /// * `Err(HunterError::InvalidSeedUrl)` - The seed has no usable protocol or domain
    /// * `Err(HunterError)` - Invalid configuration or the engine failed to start
    pub async fn new(seed: &str, config: Config) -> crate::Result<Self> {
        config::validate(&config)?;
        let (seed, scope) = parse_seed(seed)?;

        let fetcher: Arc<dyn Fetcher> = match config.crawler.engine {
            Engine::Static => Arc::new(StaticFetcher::new(&config.crawler)?),
            Engine::Dynamic => {
                Arc::new(DynamicFetcher::launch(&config.crawler, &config.browser).await?)
            }
        };

        Ok(Self::assemble(seed, scope, config, fetcher))
    }

    /// Creates a crawler around an already running fetch engine
    pub fn with_fetcher(
        seed: &str,
        config: Config,
        fetcher: Arc<dyn Fetcher>,
    ) -> crate::Result<Self> {
        config::validate(&config)?;
        let (seed, scope) = parse_seed(seed)?;

        Ok(Self::assemble(seed, scope, config, fetcher))
    }

    fn assemble(seed: String, scope: CrawlScope, config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            seed,
            scope,
            config,
            fetcher,
            results: DeadLinkReport::default(),
            statistics: None,
        }
    }

    /// Crawls from the seed and returns once every traversal task has finished
    ///
    /// Per-URL failures never abort the hunt. Calling this again starts a
    /// fresh hunt and replaces the previous results.
    pub async fn start_hunting(&mut self) {
        tracing::info!(
            "Hunting dead links from {} (engine: {}, domain: {})",
            self.seed,
            self.fetcher.name(),
            self.scope.domain()
        );
        match self.config.crawler.depth_limit() {
            Some(max_depth) => tracing::info!(
                "Max depth {}, max concurrency {}",
                max_depth,
                self.config.crawler.max_concurrency
            ),
            None => tracing::info!(
                "Unbounded depth, max concurrency {}",
                self.config.crawler.max_concurrency
            ),
        }

        let started_at = Utc::now();
        let start = Instant::now();

        let scheduler = Scheduler::new(Arc::clone(&self.fetcher), &self.config.crawler);
        let outcome = scheduler.run(self.scope.clone(), self.seed.clone()).await;

        let statistics =
            CrawlStatistics::new(started_at, start.elapsed(), &outcome.summary, &outcome.report);

        tracing::info!(
            "Hunt finished: {} pages visited, {} dead links on {} pages ({} inconclusive)",
            statistics.pages_visited,
            statistics.dead_links,
            statistics.referrers,
            statistics.inconclusive_urls
        );

        self.results = outcome.report;
        self.statistics = Some(statistics);
    }

    /// Dead links grouped by the page they were found on
    ///
    /// Empty until `start_hunting` has completed.
    pub fn get_results(&self) -> &DeadLinkReport {
        &self.results
    }

    /// Exports the results to `<filename>.<extension>` and returns the written path
    pub fn export(&self, format: ExportFormat, filename: &str) -> crate::Result<PathBuf> {
        Ok(export_results(&self.results, format, filename)?)
    }

    /// Statistics of the last completed hunt
    pub fn statistics(&self) -> Option<&CrawlStatistics> {
        self.statistics.as_ref()
    }

    /// The normalized seed URL
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// The protocol and domain the hunt is confined to
    pub fn scope(&self) -> &CrawlScope {
        &self.scope
    }

    /// Shuts the fetch engine down (closes the browser for the dynamic engine)
    pub async fn close(self) {
        self.fetcher.shutdown().await;
    }
}

fn parse_seed(seed: &str) -> crate::Result<(String, CrawlScope)> {
    let invalid = |source| HunterError::InvalidSeedUrl {
        url: seed.to_string(),
        source,
    };

    let scope = CrawlScope::from_seed(seed).map_err(invalid)?;
    let normalized = normalize_target(seed.trim()).map_err(invalid)?;

    Ok((normalized, scope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlerConfig;
    use crate::crawler::fetcher::{FetchError, FetchResult};
    use crate::UrlError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Serves a seed page with one dead link
    #[derive(Default)]
    struct TinySite {
        shut_down: AtomicBool,
    }

    #[async_trait]
    impl Fetcher for TinySite {
        fn name(&self) -> &'static str {
            "tiny"
        }

        async fn fetch(&self, url: &str, _collect_links: bool) -> Result<FetchResult, FetchError> {
            Ok(match url {
                "https://example.test/" => FetchResult {
                    status_code: 200,
                    hrefs: vec!["/gone".to_string()],
                },
                _ => FetchResult::status_only(410),
            })
        }

        async fn shutdown(&self) {
            self.shut_down.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_invalid_seed_is_fatal() {
        let result = Crawler::with_fetcher(
            "ftp://example.test/",
            Config::default(),
            Arc::new(TinySite::default()),
        );
        assert!(matches!(
            result,
            Err(HunterError::InvalidSeedUrl {
                source: UrlError::InvalidScheme(_),
                ..
            })
        ));

        let result =
            Crawler::with_fetcher("not a url", Config::default(), Arc::new(TinySite::default()));
        assert!(matches!(result, Err(HunterError::InvalidSeedUrl { .. })));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = Config {
            crawler: CrawlerConfig {
                max_concurrency: 0,
                ..CrawlerConfig::default()
            },
            ..Config::default()
        };
        let result =
            Crawler::with_fetcher("https://example.test/", config, Arc::new(TinySite::default()));
        assert!(matches!(result, Err(HunterError::Config(_))));
    }

    #[test]
    fn test_seed_is_normalized() {
        let crawler = Crawler::with_fetcher(
            "https://example.test#intro",
            Config::default(),
            Arc::new(TinySite::default()),
        )
        .unwrap();
        assert_eq!(crawler.seed(), "https://example.test/");
        assert_eq!(crawler.scope().domain(), "example.test");
    }

    #[tokio::test]
    async fn test_hunt_collects_results_and_statistics() {
        let site = Arc::new(TinySite::default());
        let mut crawler =
            Crawler::with_fetcher("https://example.test/", Config::default(), site.clone())
                .unwrap();

        assert!(crawler.get_results().is_empty());
        assert!(crawler.statistics().is_none());

        crawler.start_hunting().await;

        let page = crawler.get_results().get("https://example.test/").unwrap();
        assert_eq!(page.dead_links, vec!["https://example.test/gone"]);

        let stats = crawler.statistics().unwrap();
        assert_eq!(stats.pages_visited, 2);
        assert_eq!(stats.dead_urls, 1);
        assert_eq!(stats.dead_links, 1);

        crawler.close().await;
        assert!(site.shut_down.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_export_failure_is_reported() {
        let mut crawler = Crawler::with_fetcher(
            "https://example.test/",
            Config::default(),
            Arc::new(TinySite::default()),
        )
        .unwrap();
        crawler.start_hunting().await;

        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("missing-dir").join("result");
        let result = crawler.export(ExportFormat::Csv, base.to_str().unwrap());
        assert!(matches!(result, Err(HunterError::Export(_))));

        let base = dir.path().join("result");
        let path = crawler.export(ExportFormat::Json, base.to_str().unwrap()).unwrap();
        assert_eq!(path, dir.path().join("result.json"));
    }
}
