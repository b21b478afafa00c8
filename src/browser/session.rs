//! Browser session lifecycle
//!
//! One browser process and one page per run, owned exclusively by the run
//! and released on every exit path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures_util::StreamExt;
use tokio::task::JoinHandle;

use crate::common::config::{Timeouts, BROWSER_BINARIES};
use crate::common::{Config, Error, Result};

/// An exclusive browser session: process, CDP handler task, and one page
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_handle: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a browser process and open a blank page
    pub async fn launch(config: &Config, headful: bool) -> Result<Self> {
        let binary = config
            .browser_binary()
            .ok_or_else(|| Error::browser_not_found(BROWSER_BINARIES))?;

        tracing::debug!(binary = %binary.display(), "launching browser");

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .window_size(config.browser.width, config.browser.height)
            .chrome_executable(&binary);

        if headful || !config.browser.headless {
            builder = builder.with_head();
        }
        for arg in &config.browser.args {
            builder = builder.arg(arg.as_str());
        }

        let browser_config = builder.build().map_err(Error::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::BrowserLaunch(e.to_string()))?;

        // The handler task pumps CDP messages; the session is unusable
        // without it
        let handler_handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::debug!("CDP handler loop ended");
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::BrowserLaunch(format!("failed to open page: {e}")))?;

        Ok(Self {
            browser,
            page,
            handler_handle,
        })
    }

    /// The session's single page
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate to a URL and wait for the page to finish loading
    pub async fn goto(&self, url: &str, timeouts: &Timeouts) -> Result<()> {
        tracing::debug!(url, "navigating");

        let navigate = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<(), chromiumoxide::error::CdpError>(())
        };

        match tokio::time::timeout(Duration::from_secs(timeouts.navigation_secs), navigate).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(Error::navigation(url, e.to_string())),
            Err(_) => Err(Error::navigation(
                url,
                format!(
                    "did not finish loading within {} seconds",
                    timeouts.navigation_secs
                ),
            )),
        }
    }

    /// Capture a viewport PNG and write it to `path`, overwriting any
    /// prior file
    pub async fn screenshot(&self, path: &Path, timeouts: &Timeouts) -> Result<PathBuf> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(false)
            .build();

        let capture = self.page.screenshot(params);
        let bytes = match tokio::time::timeout(
            Duration::from_secs(timeouts.action_secs),
            capture,
        )
        .await
        {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => return Err(Error::screenshot(path, e.to_string())),
            Err(_) => {
                return Err(Error::ActionTimeout {
                    action: "screenshot".to_string(),
                    secs: timeouts.action_secs,
                })
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::screenshot(path, e.to_string()))?;
            }
        }
        std::fs::write(path, &bytes).map_err(|e| Error::screenshot(path, e.to_string()))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "screenshot written");
        Ok(path.to_path_buf())
    }

    /// Close the browser and stop the CDP handler task
    ///
    /// Called on both success and failure paths so no browser process
    /// outlives the run.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!(error = %e, "error closing browser");
        }
        let _ = self.browser.wait().await;
        self.handler_handle.abort();
    }
}
