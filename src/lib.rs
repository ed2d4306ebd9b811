//! Dead Link Hunter: a concurrent same-domain dead link crawler
//!
//! This crate crawls a website from a seed URL, follows hyperlinks that stay on
//! the seed's domain, and reports every link that resolves to a failing HTTP
//! response, grouped by the page that referenced it.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Dead Link Hunter operations
#[derive(Debug, Error)]
pub enum HunterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL {url}: {source}")]
    InvalidSeedUrl { url: String, source: UrlError },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Reasons an anchor href is dropped before it becomes a crawl target
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HrefError {
    #[error("empty href")]
    Empty,

    #[error("fragment-only href")]
    Fragment,

    #[error("unrecognized href: {0}")]
    Unrecognized(String),
}

/// Result type alias for Dead Link Hunter operations
pub type Result<T> = std::result::Result<T, HunterError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, Engine};
pub use crawler::Crawler;
pub use state::{DeadLinkReport, PageDeadLinks, Visit};
pub use url::{extract_protocol_and_domain, is_in_scope, resolve_href, CrawlScope};
