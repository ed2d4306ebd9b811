//! CSV export of grouped results

use crate::output::traits::{grouped_rows, ExportResult, Exporter};
use crate::state::DeadLinkReport;
use std::io::Write;

/// Column headers of the CSV file
pub const CSV_HEADERS: [&str; 3] = ["Page", "Counts", "Dead Links"];

/// Writes one CSV row per (referrer, dead link) pair
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, report: &DeadLinkReport, writer: &mut dyn Write) -> ExportResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADERS)?;

        for row in grouped_rows(report) {
            let count = row.count.map(|count| count.to_string()).unwrap_or_default();
            csv_writer.write_record([row.page.unwrap_or_default(), count.as_str(), row.dead_link])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
