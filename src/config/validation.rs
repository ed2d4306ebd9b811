use crate::config::types::{BrowserConfig, Config, CrawlerConfig};
use crate::ConfigError;

const MAX_CONCURRENCY_LIMIT: u32 = 500;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
///
/// Called by the loader, and again by the binary after command-line
/// overrides are applied.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_browser_config(&config.browser)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth = 0 is valid: only the seed is fetched

    if config.max_concurrency < 1 || config.max_concurrency > MAX_CONCURRENCY_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY_LIMIT, config.max_concurrency
        )));
    }

    if config.fetch_timeout_secs < 1 || config.fetch_timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.fetch_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates browser configuration
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.chromium_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "chromium_path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}
