//! Headless browser fetch engine
//!
//! One Chromium process is shared by the whole crawl. Every fetch gets its
//! own browser context (isolated cookies and storage), which is disposed as
//! soon as the fetch finishes so memory stays bounded.

use crate::config::{BrowserConfig, CrawlerConfig};
use crate::crawler::fetcher::{build_http_client, probe_head, FetchError, FetchResult, Fetcher};
use crate::url::is_binary_file_url;
use crate::HunterError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::cdp::browser_protocol::browser::{BrowserContextId, CloseParams};
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use reqwest::Client;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long `shutdown` waits for the CDP handler to drain
const HANDLER_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Chromium's net error for a 4xx/5xx navigation it refuses to render
const HTTP_RESPONSE_CODE_FAILURE: &str = "ERR_HTTP_RESPONSE_CODE_FAILURE";

/// Dynamic engine: headless Chromium navigation plus live DOM queries
///
/// Captures links inserted by client-side script, which the static engine
/// cannot see.
pub struct DynamicFetcher {
    browser: Browser,
    handler_task: Mutex<Option<JoinHandle<()>>>,
    client: Client,
    navigation_timeout: Duration,
}

impl DynamicFetcher {
    /// Launches the shared browser process
    ///
    /// The executable comes from `browser.chromium_path`, then the
    /// `CHROMIUM_PATH` environment variable, then chromiumoxide's own search
    /// of the usual install locations.
    pub async fn launch(crawler: &CrawlerConfig, browser: &BrowserConfig) -> crate::Result<Self> {
        let client = build_http_client(crawler)?;

        let mut builder = ChromeConfig::builder()
            .request_timeout(crawler.fetch_timeout())
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-extensions")
            .arg("--disable-notifications")
            .arg("--mute-audio")
            .arg(format!("--user-agent={}", crawler.user_agent));

        if let Some(path) = browser_executable(browser) {
            tracing::info!("Using browser at {}", path.display());
            builder = builder.chrome_executable(path);
        }

        if !browser.headless {
            builder = builder.with_head();
        }

        let chrome_config = builder.build().map_err(HunterError::Browser)?;

        let (chrome, mut handler) = Browser::launch(chrome_config)
            .await
            .map_err(|e| HunterError::Browser(format!("Failed to launch browser: {}", e)))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("Browser handler event error: {}", e);
                }
            }
            tracing::debug!("Browser handler task completed");
        });

        tracing::info!("Headless browser launched");

        Ok(Self {
            browser: chrome,
            handler_task: Mutex::new(Some(handler_task)),
            client,
            navigation_timeout: crawler.fetch_timeout(),
        })
    }

    /// Renders `url` inside a fresh browser context, disposing it afterwards
    async fn render(&self, url: &str, collect_links: bool) -> Result<FetchResult, FetchError> {
        let context = self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await
            .map_err(|e| render_error(url, e))?;
        let context_id = context.result.browser_context_id.clone();

        let outcome = tokio::time::timeout(
            self.navigation_timeout,
            self.render_in_context(url, context_id.clone(), collect_links),
        )
        .await;

        if let Err(e) = self
            .browser
            .execute(DisposeBrowserContextParams::new(context_id))
            .await
        {
            tracing::warn!("Failed to dispose browser context for {}: {}", url, e);
        }

        match outcome {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
        }
    }

    async fn render_in_context(
        &self,
        url: &str,
        context_id: BrowserContextId,
        collect_links: bool,
    ) -> Result<FetchResult, FetchError> {
        let target = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id)
            .build()
            .map_err(|e| render_error(url, e))?;

        let page = self
            .browser
            .new_page(target)
            .await
            .map_err(|e| render_error(url, e))?;

        let result = navigate(&page, url, collect_links).await;

        if let Err(e) = page.close().await {
            tracing::trace!("Failed to close page for {}: {}", url, e);
        }

        result
    }
}

#[async_trait]
impl Fetcher for DynamicFetcher {
    fn name(&self) -> &'static str {
        "dynamic"
    }

    async fn fetch(&self, url: &str, collect_links: bool) -> Result<FetchResult, FetchError> {
        if is_binary_file_url(url) {
            return probe_head(&self.client, url).await;
        }

        tracing::debug!("Rendering page {}", url);
        match self.render(url, collect_links).await {
            Err(FetchError::Render { message, .. }) if is_http_status_failure(&message) => {
                recover_http_status(&self.client, url).await
            }
            other => other,
        }
    }

    async fn shutdown(&self) {
        if let Err(e) = self.browser.execute(CloseParams::default()).await {
            tracing::warn!("Failed to close browser: {}", e);
        }

        let handler_task = self
            .handler_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(mut task) = handler_task {
            if tokio::time::timeout(HANDLER_SHUTDOWN_GRACE, &mut task)
                .await
                .is_err()
            {
                task.abort();
            }
        }

        tracing::info!("Headless browser closed");
    }
}

/// Navigates `page` to `url` and reads status and anchors from the live DOM
async fn navigate(page: &Page, url: &str, collect_links: bool) -> Result<FetchResult, FetchError> {
    page.goto(url).await.map_err(|e| render_error(url, e))?;

    let request = page
        .wait_for_navigation_response()
        .await
        .map_err(|e| render_error(url, e))?;

    let status = request
        .as_ref()
        .and_then(|request| request.response.as_ref())
        .map(|response| response.status)
        .ok_or_else(|| render_error(url, "no navigation response"))?;
    let status_code = u16::try_from(status).unwrap_or(0);

    if status_code > 299 || !collect_links {
        return Ok(FetchResult::status_only(status_code));
    }

    let anchors = page
        .find_elements("a")
        .await
        .map_err(|e| render_error(url, e))?;

    let mut hrefs = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        if let Some(href) = anchor
            .attribute("href")
            .await
            .map_err(|e| render_error(url, e))?
        {
            hrefs.push(href);
        }
    }

    Ok(FetchResult { status_code, hrefs })
}

/// Returns true if a navigation error means the server answered 4xx/5xx
fn is_http_status_failure(message: &str) -> bool {
    message.contains(HTTP_RESPONSE_CODE_FAILURE)
}

/// Asks the server directly for the status Chromium refused to render
///
/// A failing status becomes `FetchError::HttpStatus`; transport errors stay
/// network errors.
async fn recover_http_status(client: &Client, url: &str) -> Result<FetchResult, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status_code = response.status().as_u16();
    tracing::debug!("Navigation to {} failed with HTTP {}", url, status_code);

    if status_code > 299 {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status_code,
        });
    }

    Ok(FetchResult::status_only(status_code))
}

fn render_error(url: &str, error: impl Display) -> FetchError {
    FetchError::Render {
        url: url.to_string(),
        message: error.to_string(),
    }
}

fn browser_executable(config: &BrowserConfig) -> Option<PathBuf> {
    config.chromium_path.clone().or_else(|| {
        std::env::var_os("CHROMIUM_PATH")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    })
}
