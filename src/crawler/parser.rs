//! HTML parser for extracting anchor hrefs
//!
//! Hrefs are returned exactly as written in the markup. Resolution against
//! the crawl's protocol and domain happens in the scheduler, so both fetch
//! engines hand over the same raw material.

use scraper::{Html, Selector};

/// Extracts the `href` value of every `<a>` element in document order
///
/// # Example
///
/// ```
/// use dead_link_hunter::crawler::extract_hrefs;
///
/// let html = r#"<html><body><a href="/page">Link</a><a>no href</a></body></html>"#;
/// assert_eq!(extract_hrefs(html), vec!["/page".to_string()]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
