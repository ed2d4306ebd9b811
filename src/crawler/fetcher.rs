//! Fetch engines
//!
//! This module defines the contract every fetch engine implements and holds
//! the pieces the engines share:
//! - The `Fetcher` trait and its `FetchResult` / `FetchError` types
//! - Building the HTTP client with the configured user agent and timeout
//! - HEAD probes for binary targets
//! - The static engine (GET plus HTML parsing)

use crate::config::CrawlerConfig;
use crate::crawler::parser::extract_hrefs;
use crate::url::is_binary_file_url;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Result of a single page load or HEAD probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// HTTP status code of the final response
    pub status_code: u16,

    /// Raw anchor `href` values, unresolved; empty for probes and dead pages
    pub hrefs: Vec<String>,
}

impl FetchResult {
    /// A result that reports liveness only
    pub fn status_only(status_code: u16) -> Self {
        Self {
            status_code,
            hrefs: Vec::new(),
        }
    }
}

/// Reasons a fetch did not produce a page
///
/// `HttpStatus` is a definitive answer from the server and is classified by
/// its status code. The other variants mean the URL could not be evaluated:
/// it is neither marked dead nor expanded.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status_code} for {url}")]
    HttpStatus { url: String, status_code: u16 },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Render error for {url}: {message}")]
    Render { url: String, message: String },
}

impl FetchError {
    /// Classifies a reqwest failure
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                source: error,
            }
        }
    }

    /// The URL the failure belongs to
    pub fn url(&self) -> &str {
        match self {
            Self::HttpStatus { url, .. }
            | Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::Render { url, .. } => url,
        }
    }

    /// The status code behind a definitive HTTP failure, if this is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// A page-loading engine
///
/// Implementations must send a HEAD request instead of a full load for URLs
/// with a binary file extension (see `is_binary_file_url`), and report only
/// the status code for them.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Short engine name used in logs
    fn name(&self) -> &'static str;

    /// Loads `url` and returns its status and, if `collect_links` is set and
    /// the page is live, the raw hrefs of its anchors
    async fn fetch(&self, url: &str, collect_links: bool) -> Result<FetchResult, FetchError>;

    /// Releases engine resources once no crawl will use this fetcher again
    async fn shutdown(&self) {}
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (up to 10 hops); the status of the final response
/// decides liveness.
///
/// # Example
///
/// ```no_run
/// use dead_link_hunter::config::CrawlerConfig;
/// use dead_link_hunter::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let timeout = config.fetch_timeout();

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a HEAD request and reports only the status code
///
/// Used for binary targets so large payloads are never downloaded.
pub async fn probe_head(client: &Client, url: &str) -> Result<FetchResult, FetchError> {
    tracing::debug!("Probing binary file {}", url);

    let response = client
        .head(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    Ok(FetchResult::status_only(response.status().as_u16()))
}

/// Static engine: plain HTTP GET plus HTML anchor extraction
///
/// Embedded scripts are not executed and iframes are not followed.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    client: Client,
}

impl StaticFetcher {
    /// Creates a static fetcher with a client built from `config`
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a static fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self, url: &str, collect_links: bool) -> Result<FetchResult, FetchError> {
        if is_binary_file_url(url) {
            return probe_head(&self.client, url).await;
        }

        tracing::debug!("Fetching page {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status_code = response.status().as_u16();
        if status_code > 299 || !collect_links {
            return Ok(FetchResult::status_only(status_code));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        let hrefs = extract_hrefs(&String::from_utf8_lossy(&body));

        Ok(FetchResult { status_code, hrefs })
    }
}
