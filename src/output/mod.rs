//! Output module for presenting hunt results
//!
//! This module handles:
//! - Printing the grouped result table to the console
//! - Exporting results as CSV or JSON files
//! - Summarizing crawl statistics

mod console;
mod csv_export;
mod json_export;
pub mod stats;
mod traits;

pub use console::{print_results, render_results, NO_DEAD_LINKS, SEED_LABEL};
pub use csv_export::{CsvExporter, CSV_HEADERS};
pub use json_export::JsonExporter;
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{grouped_rows, ExportError, ExportResult, Exporter, ResultRow};

use crate::state::DeadLinkReport;
use std::fmt;
use std::path::PathBuf;

/// File formats results can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Returns the exporter for this format
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Csv => Box::new(CsvExporter),
            ExportFormat::Json => Box::new(JsonExporter),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Exports `report` to `<filename>.<extension>` and returns the written path
///
/// # Arguments
///
/// * `report` - The results to export
/// * `format` - CSV or JSON
/// * `filename` - Target file name without extension
pub fn export_results(
    report: &DeadLinkReport,
    format: ExportFormat,
    filename: &str,
) -> ExportResult<PathBuf> {
    let exporter = format.exporter();
    let path = PathBuf::from(format!("{}.{}", filename, exporter.extension()));

    exporter.export(report, &path)?;
    tracing::info!("Exported {} dead links to {}", report.total_dead_links(), path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DeadLinkAggregator;

    #[test]
    fn test_export_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("result");

        let aggregator = DeadLinkAggregator::new();
        aggregator.record_dead_link("http://example.test/", "http://example.test/missing");
        let report = aggregator.into_report();

        let csv_path = export_results(&report, ExportFormat::Csv, base.to_str().unwrap()).unwrap();
        assert_eq!(csv_path, dir.path().join("result.csv"));
        assert!(csv_path.exists());

        let json_path =
            export_results(&report, ExportFormat::Json, base.to_str().unwrap()).unwrap();
        assert_eq!(json_path, dir.path().join("result.json"));
        let text = std::fs::read_to_string(json_path).unwrap();
        assert!(text.contains("http://example.test/missing"));
    }

    #[test]
    fn test_export_unwritable_destination_surfaces_error() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("no-such-dir").join("result");

        let result = export_results(
            &DeadLinkReport::default(),
            ExportFormat::Json,
            base.to_str().unwrap(),
        );
        assert!(matches!(result, Err(ExportError::Io(_))));
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(ExportFormat::Csv.to_string(), "csv");
        assert_eq!(ExportFormat::Json.to_string(), "json");
    }
}
