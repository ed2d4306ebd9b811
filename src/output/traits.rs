//! Exporter trait and the grouped row layout shared by every output
//!
//! All outputs present the report the same way: one row per
//! (referrer, dead link) pair, with the referrer and its count filled in
//! only on the first row of each group.

use crate::state::DeadLinkReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while exporting results
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// One display row of the grouped result table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRow<'a> {
    /// The referrer, on the first row of its group only
    pub page: Option<&'a str>,

    /// The referrer's dead link count, on the first row of its group only
    pub count: Option<usize>,

    /// One dead link found on the referrer
    pub dead_link: &'a str,
}

/// Flattens a report into grouped rows, ordered by referrer
pub fn grouped_rows(report: &DeadLinkReport) -> Vec<ResultRow<'_>> {
    let mut rows = Vec::with_capacity(report.total_dead_links());

    for (page, links) in report {
        for (index, dead_link) in links.dead_links.iter().enumerate() {
            let first = index == 0;
            rows.push(ResultRow {
                page: first.then_some(page.as_str()),
                count: first.then_some(links.count),
                dead_link: dead_link.as_str(),
            });
        }
    }

    rows
}

/// Trait for result exporters
///
/// Exporters write the whole report in one go. Failures are always
/// returned to the caller, never swallowed.
pub trait Exporter {
    /// File extension appended to the requested file name
    fn extension(&self) -> &'static str;

    /// Writes `report` to `writer`
    fn write(&self, report: &DeadLinkReport, writer: &mut dyn Write) -> ExportResult<()>;

    /// Writes `report` to a new file at `path`, replacing any existing file
    fn export(&self, report: &DeadLinkReport, path: &Path) -> ExportResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(report, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
