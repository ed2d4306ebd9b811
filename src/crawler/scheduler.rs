//! Scheduler for the recursive link traversal
//!
//! This module handles:
//! - One traversal task per discovered link, joined through a wait-group
//! - Exactly-once evaluation of each URL via the visitation ledger
//! - Global concurrency limiting via a semaphore held only around fetches
//! - The depth cap for the static engine
//! - Scoping discovered hrefs before they reach the ledger

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::state::{DeadLinkAggregator, DeadLinkReport, LedgerSummary, Visit, VisitationLedger};
use crate::url::{normalize_target, CrawlScope};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;

/// Everything a traversal task needs, shared across the whole crawl
struct CrawlContext {
    fetcher: Arc<dyn Fetcher>,
    scope: CrawlScope,
    ledger: VisitationLedger,
    aggregator: DeadLinkAggregator,
    permits: Semaphore,
    depth_limit: Option<u32>,
}

impl CrawlContext {
    /// Returns true if links found at `depth` should be followed
    ///
    /// A URL is evaluated once, at the depth of whichever task reached the
    /// ledger first. If a deeper path gets there before a shallower one, the
    /// page keeps the deeper depth, so coverage near the cap depends on
    /// response latency.
    fn expands_at(&self, depth: u32) -> bool {
        self.depth_limit.map_or(true, |max_depth| depth < max_depth)
    }
}

/// Wait-group over spawned traversal tasks
///
/// Every live task holds a clone of the sender, so the receiving side sees
/// the channel close only after the whole task tree has finished.
#[derive(Clone)]
struct TaskGroup {
    handles: mpsc::UnboundedSender<JoinHandle<()>>,
}

impl TaskGroup {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        let handle = tokio::spawn(task);
        if self.handles.send(handle).is_err() {
            tracing::trace!("Task group closed before a traversal task was registered");
        }
    }
}

/// Outcome of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Dead links grouped by referrer
    pub report: DeadLinkReport,

    /// Ledger counts at the end of the crawl
    pub summary: LedgerSummary,
}

/// Scheduler drives one crawl from a seed URL to completion
///
/// The scheduler coordinates:
/// - Global concurrency limits (max fetches in flight)
/// - Depth limits (static engine only)
/// - Deduplication and coalescing of repeated URLs
/// - Collection of dead links into a report
pub struct Scheduler {
    fetcher: Arc<dyn Fetcher>,
    max_concurrency: usize,
    depth_limit: Option<u32>,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The engine used to load pages
    /// * `config` - The crawler configuration
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            max_concurrency: config.max_concurrency.max(1) as usize,
            depth_limit: config.depth_limit(),
        }
    }

    /// Crawls from `seed` and returns once every spawned task has finished
    ///
    /// The seed is evaluated at depth 0. If it is dead it is recorded under
    /// the empty referrer.
    pub async fn run(&self, scope: CrawlScope, seed: String) -> CrawlOutcome {
        let context = Arc::new(CrawlContext {
            fetcher: Arc::clone(&self.fetcher),
            scope,
            ledger: VisitationLedger::new(),
            aggregator: DeadLinkAggregator::new(),
            permits: Semaphore::new(self.max_concurrency),
            depth_limit: self.depth_limit,
        });

        let (sender, mut handles) = mpsc::unbounded_channel();
        let tasks = TaskGroup { handles: sender };

        tasks.spawn(traverse(
            Arc::clone(&context),
            tasks.clone(),
            seed,
            String::new(),
            0,
        ));
        drop(tasks);

        while let Some(handle) = handles.recv().await {
            if let Err(e) = handle.await {
                tracing::error!("Traversal task failed: {}", e);
            }
        }

        CrawlOutcome {
            report: context.aggregator.snapshot(),
            summary: context.ledger.summary(),
        }
    }
}

/// Visits `url` as a link found on `referrer`
///
/// Boxed so the recursion through `evaluate` has a nameable type.
fn traverse(
    context: Arc<CrawlContext>,
    tasks: TaskGroup,
    url: String,
    referrer: String,
    depth: u32,
) -> BoxFuture<'static, ()> {
    async move {
        let visit = context
            .ledger
            .visit_once(&url, || evaluate(&context, &tasks, &url, depth))
            .await;

        if visit.is_dead() {
            tracing::debug!("Dead link {} (found on {:?})", url, referrer);
            context.aggregator.record_dead_link(&referrer, &url);
        }
    }
    .boxed()
}

/// Fetches `url` once, classifies it and spawns tasks for its links
async fn evaluate(context: &Arc<CrawlContext>, tasks: &TaskGroup, url: &str, depth: u32) -> Visit {
    let expand = context.expands_at(depth);

    let fetched = {
        let Ok(_permit) = context.permits.acquire().await else {
            return Visit::Inconclusive;
        };
        context.fetcher.fetch(url, expand).await
    };

    let result = match fetched {
        Ok(result) => result,
        Err(e) => match e.status_code() {
            Some(status_code) => {
                tracing::debug!("Fetch of {} failed with HTTP {}", url, status_code);
                return Visit::from_status(status_code);
            }
            None => {
                tracing::warn!("{}", e);
                return Visit::Inconclusive;
            }
        },
    };

    let visit = Visit::from_status(result.status_code);
    tracing::debug!(
        "Fetched {} at depth {}: {} ({})",
        url,
        depth,
        result.status_code,
        visit
    );

    if visit.is_live() && expand {
        for target in in_scope_targets(&context.scope, &result.hrefs) {
            tasks.spawn(traverse(
                Arc::clone(context),
                tasks.clone(),
                target,
                url.to_string(),
                depth + 1,
            ));
        }
    }

    visit
}

/// Resolves raw hrefs into unique in-scope targets, keeping discovery order
fn in_scope_targets(scope: &CrawlScope, hrefs: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for href in hrefs {
        let resolved = match scope.resolve(href) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::trace!("Dropping href {:?}: {}", href, e);
                continue;
            }
        };

        let target = match normalize_target(&resolved) {
            Ok(target) => target,
            Err(e) => {
                tracing::trace!("Dropping href {:?}: {}", href, e);
                continue;
            }
        };

        if !scope.contains(&target) {
            tracing::trace!("Dropping out-of-scope link {}", target);
            continue;
        }

        if seen.insert(target.clone()) {
            targets.push(target);
        }
    }

    targets
}
