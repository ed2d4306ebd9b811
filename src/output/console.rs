//! Console rendering of grouped results

use crate::output::traits::grouped_rows;
use crate::state::DeadLinkReport;

/// Message shown when a crawl found nothing
pub const NO_DEAD_LINKS: &str = "No dead links found";

/// Page label for the group holding a dead seed URL
pub const SEED_LABEL: &str = "(seed)";

const HEADERS: [&str; 3] = ["Page", "Counts", "Dead Links"];

/// Renders the report as a plain-text table
pub fn render_results(report: &DeadLinkReport) -> String {
    let rows = grouped_rows(report);
    if rows.is_empty() {
        return format!("{}\n", NO_DEAD_LINKS);
    }

    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|row| {
            let page = match row.page {
                Some("") => SEED_LABEL,
                Some(page) => page,
                None => "",
            };
            [
                page.to_string(),
                row.count.map(|count| count.to_string()).unwrap_or_default(),
                row.dead_link.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.len());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);
    out.push_str(&separator);
    out.push('\n');

    for (index, (row, cell)) in rows.iter().zip(&cells).enumerate() {
        if index > 0 && row.page.is_some() {
            out.push_str(&separator);
            out.push('\n');
        }
        push_line(&mut out, cell, &widths);
    }

    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S; 3], widths: &[usize; 3]) {
    out.push_str(&format!(
        " {:<w0$} | {:<w1$} | {:<w2$}\n",
        cells[0].as_ref(),
        cells[1].as_ref(),
        cells[2].as_ref(),
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    ));
}

/// Prints the report to stdout
pub fn print_results(report: &DeadLinkReport) {
    print!("{}", render_results(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DeadLinkAggregator;

    #[test]
    fn test_empty_report_message() {
        assert_eq!(render_results(&DeadLinkReport::default()), "No dead links found\n");
    }

    #[test]
    fn test_dead_seed_group_is_labelled() {
        let aggregator = DeadLinkAggregator::new();
        aggregator.record_dead_link("", "http://example.test/");

        let table = render_results(&aggregator.into_report());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[2].trim_start().starts_with("(seed)"));
        assert!(lines[2].contains("| 1"));
        assert!(lines[2].contains("http://example.test/"));
    }

    #[test]
    fn test_table_groups_rows() {
        let aggregator = DeadLinkAggregator::new();
        aggregator.record_dead_link("http://example.test/", "http://example.test/missing");
        aggregator.record_dead_link("http://example.test/", "http://example.test/gone");
        aggregator.record_dead_link("http://example.test/b", "http://example.test/old");

        let table = render_results(&aggregator.into_report());
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].contains("Page"));
        assert!(lines[0].contains("Counts"));
        assert!(lines[0].contains("Dead Links"));
        assert!(lines[2].contains("http://example.test/ "));
        assert!(lines[2].contains("| 2"));
        assert!(lines[3].trim_start().starts_with('|'));
        assert!(lines[3].contains("http://example.test/gone"));
        assert!(lines[5].contains("http://example.test/b"));
        assert_eq!(lines.len(), 6);
    }
}
