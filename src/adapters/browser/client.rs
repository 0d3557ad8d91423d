use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::types::BrowserConfig as BrowserSettings;
use crate::error::{FlightError, Result};
use crate::ports::render::{RenderContext, RenderSource};

/// CSS selector marking the result list as loaded.
const RESULT_CONTAINER: &str = "div[role='main']";
/// Poll interval while waiting for the result container.
const READY_POLL: Duration = Duration::from_millis(250);

/// JS pulling the visible text of each result row, in render order.
const ROW_TEXT_JS: &str = r#"
    (() => Array.from(
        document.querySelectorAll("div[role='main'] ul li")
    ).map(el => el.innerText))()
"#;

/// Live render source backed by one Chromium process. Each call to
/// `open` yields an isolated page, released on `close` or on drop;
/// shutdown reaps whatever a dying runtime could not close.
pub struct ChromiumRender {
    browser: Browser,
    handler: JoinHandle<()>,
    settings: BrowserSettings,
}

impl ChromiumRender {
    /// Launch a Chromium instance with the automation flag disabled and
    /// the configured user agent, so the travel UI serves the same
    /// markup it serves a real visitor.
    pub async fn launch(settings: BrowserSettings) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--lang=en-US")
            .window_size(settings.viewport_width, settings.viewport_height);
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| FlightError::Config(format!("browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FlightError::Browser {
                reason: format!("launch failed: {e}"),
            })?;

        // The handler drives the CDP connection and must be polled for
        // the browser to make progress.
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler: handle,
            settings,
        })
    }

    /// Close the browser and reap any remaining page.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "browser close failed");
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
    }
}

#[async_trait]
impl RenderSource for ChromiumRender {
    async fn open(&self) -> Result<Box<dyn RenderContext>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| FlightError::Browser {
                reason: format!("new page failed: {e}"),
            })?;

        if let Err(e) = page.set_user_agent(self.settings.user_agent.as_str()).await {
            debug!(error = %e, "user agent override failed");
        }

        Ok(Box::new(ChromiumContext {
            page,
            settings: self.settings.clone(),
            closed: false,
        }))
    }
}

struct ChromiumContext {
    page: Page,
    settings: BrowserSettings,
    closed: bool,
}

/// A stage future dropped mid-flight must still release its tab, not
/// wait for browser shutdown. Skipped after a normal `close()`.
impl Drop for ChromiumContext {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let page = self.page.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                if let Err(e) = page.close().await {
                    debug!(error = %e, "page close on drop failed");
                }
            });
        }
    }
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn goto(&mut self, url: &str) -> Result<()> {
        debug!(%url, "navigating");
        let nav = self.page.goto(url);
        tokio::time::timeout(Duration::from_secs(self.settings.nav_timeout_secs), nav)
            .await
            .map_err(|_| FlightError::RenderTimeout {
                what: format!("navigation to {url}"),
            })?
            .map_err(|e| FlightError::Browser {
                reason: format!("navigation failed: {e}"),
            })?;
        Ok(())
    }

    /// Poll for the result container rather than sleeping a fixed
    /// interval; the page is ready the moment the list exists.
    async fn wait_ready(&mut self) -> Result<()> {
        let deadline = Duration::from_secs(self.settings.ready_timeout_secs);
        let poll = async {
            loop {
                if self.page.find_element(RESULT_CONTAINER).await.is_ok() {
                    return;
                }
                tokio::time::sleep(READY_POLL).await;
            }
        };
        tokio::time::timeout(deadline, poll)
            .await
            .map_err(|_| FlightError::RenderTimeout {
                what: "result container".into(),
            })
    }

    async fn render_blocks(&mut self) -> Result<Vec<String>> {
        let value = self
            .page
            .evaluate(ROW_TEXT_JS)
            .await
            .map_err(|e| FlightError::Browser {
                reason: format!("row extraction failed: {e}"),
            })?;
        let blocks: Vec<String> = value.into_value().map_err(|e| FlightError::Parse {
            reason: format!("row text not a string array: {e}"),
        })?;
        debug!(count = blocks.len(), "rendered result rows");
        Ok(blocks)
    }

    async fn current_address(&mut self) -> Result<String> {
        self.page
            .url()
            .await
            .map_err(|e| FlightError::Browser {
                reason: format!("url read failed: {e}"),
            })?
            .ok_or_else(|| FlightError::Browser {
                reason: "page has no address".into(),
            })
    }

    async fn commit_row(&mut self, index: usize) -> Result<()> {
        let rows = self
            .page
            .find_elements(&format!("{RESULT_CONTAINER} ul li"))
            .await
            .map_err(|e| FlightError::Browser {
                reason: format!("row lookup failed: {e}"),
            })?;
        let row = rows.get(index).ok_or_else(|| FlightError::Browser {
            reason: format!("row {index} disappeared before commit"),
        })?;
        row.click().await.map_err(|e| FlightError::Browser {
            reason: format!("row click failed: {e}"),
        })?;
        Ok(())
    }

    /// Fixed grace period so the post-commit navigation can begin, then
    /// a bounded readiness poll on the dependent view.
    async fn wait_settle(&mut self) -> Result<()> {
        tokio::time::sleep(Duration::from_millis(self.settings.settle_wait_ms)).await;
        self.wait_ready().await
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>> {
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build(),
            )
            .await
            .map_err(|e| FlightError::Browser {
                reason: format!("screenshot failed: {e}"),
            })
    }

    async fn close(&mut self) {
        self.closed = true;
        // Page::close consumes; the clone shares the same CDP target
        if let Err(e) = self.page.clone().close().await {
            debug!(error = %e, "page close failed");
        }
    }
}
