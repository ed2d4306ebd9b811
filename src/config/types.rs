use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Maximum depth of links followed by the static engine
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Maximum number of fetches in flight across the whole crawl
pub const DEFAULT_MAX_CONCURRENCY: u32 = 20;

/// Per-fetch timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for Dead Link Hunter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Which fetch engine drives the crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Plain HTTP GET plus HTML parsing
    Static,
    /// Headless Chromium navigation plus live DOM queries
    #[default]
    Dynamic,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Static => write!(f, "static"),
            Engine::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Fetch engine used for every page
    #[serde(default)]
    pub engine: Engine,

    /// Maximum depth to expand links from the seed (static engine only)
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of concurrent fetches
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: u32,

    /// Timeout for a single fetch or page navigation (seconds)
    #[serde(default = "default_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// User agent sent with HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl CrawlerConfig {
    /// Returns the fetch timeout as a `Duration`
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Returns the depth cap the scheduler should enforce
    ///
    /// Only the static engine is depth-limited.
    pub fn depth_limit(&self) -> Option<u32> {
        match self.engine {
            Engine::Static => Some(self.max_depth),
            Engine::Dynamic => None,
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            fetch_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

/// Headless browser configuration for the dynamic engine
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BrowserConfig {
    /// Explicit Chrome/Chromium executable; searched for when unset
    #[serde(default)]
    pub chromium_path: Option<PathBuf>,

    /// Run without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chromium_path: None,
            headless: default_headless(),
        }
    }
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_max_concurrency() -> u32 {
    DEFAULT_MAX_CONCURRENCY
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("dead-link-hunter/{}", env!("CARGO_PKG_VERSION"))
}

fn default_headless() -> bool {
    true
}
