//! Visitation ledger with single-flight coalescing
//!
//! Each normalized URL maps to a shared, awaitable result cell. The first
//! caller for a URL runs the fetch and publishes the outcome; concurrent
//! callers for the same URL await that cell instead of fetching again, and
//! later callers read the memoized outcome.

use crate::state::Visit;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;

/// Where a URL stands in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    /// No task has dispatched this URL
    Unvisited,
    /// A task is evaluating this URL right now
    InFlight,
    /// Evaluation finished with the given outcome
    Visited(Visit),
}

/// Outcome counts over every URL the ledger has seen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub live: usize,
    pub dead: usize,
    pub inconclusive: usize,
    pub in_flight: usize,
}

impl LedgerSummary {
    /// Number of URLs whose evaluation finished
    pub fn visited(&self) -> usize {
        self.live + self.dead + self.inconclusive
    }
}

/// Concurrency-safe record of dispatched URLs
#[derive(Debug, Default)]
pub struct VisitationLedger {
    cells: Mutex<HashMap<String, Arc<OnceCell<Visit>>>>,
}

impl VisitationLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates `url` at most once for the lifetime of the ledger
    ///
    /// * visited: returns the cached outcome without calling `fetch`
    /// * in-flight: suspends until the running evaluation publishes, then
    ///   returns the same outcome
    /// * unvisited: this caller becomes the sole executor of `fetch`
    ///
    /// Lookup and insertion of the cell happen under one lock, so two callers
    /// can never both see the URL as unvisited.
    pub async fn visit_once<F, Fut>(&self, url: &str, fetch: F) -> Visit
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Visit>,
    {
        let cell = {
            let mut cells = self.lock();
            Arc::clone(cells.entry(url.to_string()).or_default())
        };

        *cell.get_or_init(fetch).await
    }

    /// Returns the current status of `url`
    pub fn status(&self, url: &str) -> VisitStatus {
        match self.lock().get(url) {
            None => VisitStatus::Unvisited,
            Some(cell) => match cell.get() {
                Some(visit) => VisitStatus::Visited(*visit),
                None => VisitStatus::InFlight,
            },
        }
    }

    /// Returns the cached outcome of `url`, if its evaluation has finished
    pub fn outcome(&self, url: &str) -> Option<Visit> {
        match self.status(url) {
            VisitStatus::Visited(visit) => Some(visit),
            _ => None,
        }
    }

    /// Number of URLs ever dispatched
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no URL has been dispatched
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Counts outcomes across the ledger
    pub fn summary(&self) -> LedgerSummary {
        let cells = self.lock();
        let mut summary = LedgerSummary::default();

        for cell in cells.values() {
            match cell.get() {
                Some(Visit::Live) => summary.live += 1,
                Some(Visit::Dead) => summary.dead += 1,
                Some(Visit::Inconclusive) => summary.inconclusive += 1,
                None => summary.in_flight += 1,
            }
        }

        summary
    }

    // The map only ever gains entries, so a poisoned lock still guards a
    // consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<OnceCell<Visit>>>> {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
