//! Configuration module for Dead Link Hunter
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a crawl can also run from `Config::default()`
//! with command-line overrides applied on top.
//!
//! # Example
//!
//! ```no_run
//! use dead_link_hunter::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hunter.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BrowserConfig, Config, CrawlerConfig, Engine, DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_DEPTH,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
