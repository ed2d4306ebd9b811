//! State module for tracking crawl progress
//!
//! This module provides the shared, concurrency-safe state of a single crawl.
//!
//! # Components
//!
//! - `Visit`: the terminal outcome of evaluating one crawl target
//! - `VisitationLedger`: exactly-once, single-flight visitation of targets
//! - `DeadLinkAggregator`: referrer to dead-link grouping, snapshotted into a `DeadLinkReport`

mod dead_links;
mod ledger;
mod visit;

// Re-export main types
pub use dead_links::{DeadLinkAggregator, DeadLinkRecord, DeadLinkReport, PageDeadLinks};
pub use ledger::{LedgerSummary, VisitStatus, VisitationLedger};
pub use visit::Visit;
