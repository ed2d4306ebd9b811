//! URL handling module for Dead Link Hunter
//!
//! This module decides which URLs belong to a crawl. It provides protocol and
//! domain extraction from the seed, the same-domain scope test, href
//! resolution, crawl-target normalization and binary-file detection.

mod binary;
mod domain;
mod normalize;
mod resolve;

use crate::{HrefError, UrlResult};

// Re-export main functions
pub use binary::is_binary_file_url;
pub use domain::{extract_protocol_and_domain, is_in_scope};
pub use normalize::normalize_target;
pub use resolve::resolve_href;

/// The protocol and domain a crawl is confined to
///
/// Built once from the seed URL. Every href discovered during the crawl is
/// resolved against it and then tested for membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlScope {
    protocol: String,
    domain: String,
}

impl CrawlScope {
    /// Builds the scope for a crawl starting at `seed`
    ///
    /// # Examples
    ///
    /// ```
    /// use dead_link_hunter::url::CrawlScope;
    ///
    /// let scope = CrawlScope::from_seed("https://www.example.com/docs").unwrap();
    /// assert_eq!(scope.domain(), "example.com");
    /// assert!(scope.contains("https://example.com/about"));
    /// assert!(!scope.contains("https://blog.example.com/"));
    /// ```
    pub fn from_seed(seed: &str) -> UrlResult<Self> {
        let (protocol, domain) = extract_protocol_and_domain(seed)?;
        Ok(Self { protocol, domain })
    }

    /// The seed's scheme (`http` or `https`)
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// The seed's host with any `www.` label removed (port kept when explicit)
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Resolves an anchor href found on an in-scope page
    pub fn resolve(&self, href: &str) -> Result<String, HrefError> {
        resolve_href(&self.protocol, &self.domain, href)
    }

    /// Returns true if `url` is on the crawl's domain
    pub fn contains(&self, url: &str) -> bool {
        is_in_scope(&self.domain, url)
    }
}
