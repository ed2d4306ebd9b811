//! Dead-link aggregation
//!
//! Traversal tasks report each (referrer, dead URL) edge the moment they
//! learn a target is dead. The aggregator groups edges by referrer; once the
//! crawl finishes it is frozen into a read-only `DeadLinkReport`.

use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One edge of the dead-link graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadLinkRecord {
    /// Page the anchor was found on; empty when the seed itself is dead
    pub referrer: String,
    /// The dead target
    pub dead_url: String,
}

/// Dead links found on a single page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageDeadLinks {
    /// Number of dead links on the page; always equals `dead_links.len()`
    pub count: usize,
    /// Dead URLs in discovery order
    pub dead_links: Vec<String>,
}

impl PageDeadLinks {
    fn push(&mut self, dead_url: String) {
        self.dead_links.push(dead_url);
        self.count += 1;
    }
}

/// Concurrency-safe mapping from referrer to the dead links it contains
#[derive(Debug, Default)]
pub struct DeadLinkAggregator {
    pages: Mutex<BTreeMap<String, PageDeadLinks>>,
}

impl DeadLinkAggregator {
    /// Creates an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `dead_url` to `referrer`'s entry, creating it on first touch
    ///
    /// An empty `referrer` is a valid key meaning the crawl root itself is dead.
    pub fn record_dead_link(&self, referrer: &str, dead_url: &str) {
        self.lock()
            .entry(referrer.to_string())
            .or_default()
            .push(dead_url.to_string());
    }

    /// Number of referrers with at least one dead link
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no dead link has been recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies the current state into a read-only report
    pub fn snapshot(&self) -> DeadLinkReport {
        DeadLinkReport {
            pages: self.lock().clone(),
        }
    }

    /// Consumes the aggregator once no task can write to it anymore
    pub fn into_report(self) -> DeadLinkReport {
        DeadLinkReport {
            pages: self
                .pages
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }

    // Every write is a single push, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, PageDeadLinks>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read-only result of a finished crawl
///
/// Referrers iterate in lexical order; dead links within a referrer keep
/// their discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeadLinkReport {
    pages: BTreeMap<String, PageDeadLinks>,
}

impl DeadLinkReport {
    /// Returns the dead links found on `referrer`
    pub fn get(&self, referrer: &str) -> Option<&PageDeadLinks> {
        self.pages.get(referrer)
    }

    /// Iterates over `(referrer, dead links)` pairs
    pub fn iter(&self) -> btree_map::Iter<'_, String, PageDeadLinks> {
        self.pages.iter()
    }

    /// Iterates over every dead edge
    pub fn records(&self) -> impl Iterator<Item = DeadLinkRecord> + '_ {
        self.pages.iter().flat_map(|(referrer, page)| {
            page.dead_links.iter().map(move |dead_url| DeadLinkRecord {
                referrer: referrer.clone(),
                dead_url: dead_url.clone(),
            })
        })
    }

    /// Number of referrers with dead links
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if the crawl found no dead links
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of dead edges across all referrers
    pub fn total_dead_links(&self) -> usize {
        self.pages.values().map(|page| page.count).sum()
    }
}

impl<'a> IntoIterator for &'a DeadLinkReport {
    type Item = (&'a String, &'a PageDeadLinks);
    type IntoIter = btree_map::Iter<'a, String, PageDeadLinks>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
