//! JSON export of grouped results
//!
//! Produces a pretty-printed array with four-space indentation. `Page` and
//! `Counts` appear only on the first record of each referrer's group.

use crate::output::traits::{grouped_rows, ExportResult, Exporter, ResultRow};
use crate::state::DeadLinkReport;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    #[serde(rename = "Page", skip_serializing_if = "Option::is_none")]
    page: Option<&'a str>,

    #[serde(rename = "Counts", skip_serializing_if = "Option::is_none")]
    counts: Option<usize>,

    #[serde(rename = "Dead Links")]
    dead_link: &'a str,
}

impl<'a> From<ResultRow<'a>> for JsonRecord<'a> {
    fn from(row: ResultRow<'a>) -> Self {
        Self {
            page: row.page,
            counts: row.count,
            dead_link: row.dead_link,
        }
    }
}

/// Writes one JSON record per (referrer, dead link) pair
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, report: &DeadLinkReport, writer: &mut dyn Write) -> ExportResult<()> {
        let records: Vec<JsonRecord<'_>> =
            grouped_rows(report).into_iter().map(JsonRecord::from).collect();

        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        records.serialize(&mut serializer)?;
        Ok(())
    }
}
