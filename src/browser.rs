//! chromiumoxide implementation of the [`page`](crate::page) capability
//! traits.
//!
//! Nothing in here is exercised by the unit tests; the pipeline is tested
//! against stub implementations of the same traits.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::time::{self, Instant};
use tracing::{debug, error, info};

use crate::error::Error;
use crate::page::{ListingPage, Tile};

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One headless (or headed) browser process plus its CDP handler task.
pub struct BrowserSession {
    browser: Browser,
}

impl BrowserSession {
    pub async fn launch(headless: bool) -> Result<Self, Error> {
        info!("Initializing browser");

        let mut config = BrowserConfig::builder();
        if !headless {
            config = config.with_head();
        }
        config = config.window_size(1920, 1080);
        config = config.viewport(None);

        let browser_config = config
            .build()
            .map_err(|e| Error::Browser(format!("failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::Browser(format!("failed to launch browser: {}", e)))?;

        tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if let Err(e) = h {
                    error!("Browser handler error: {:?}", e);
                }
            }
        });

        Ok(Self { browser })
    }

    /// Open `url` and wait for the load to settle, bounded by `timeout`.
    pub async fn navigate(&self, url: &str, timeout: Duration) -> Result<CdpPage, Error> {
        let page = time::timeout(timeout, self.browser.new_page(url))
            .await
            .map_err(|_| {
                Error::Navigation(format!(
                    "page load timed out after {}s: {}",
                    timeout.as_secs(),
                    url
                ))
            })?
            .map_err(|e| Error::Navigation(format!("failed to open {}: {}", url, e)))?;

        time::timeout(timeout, page.wait_for_navigation())
            .await
            .map_err(|_| {
                Error::Navigation(format!(
                    "navigation did not settle within {}s: {}",
                    timeout.as_secs(),
                    url
                ))
            })?
            .map_err(|e| Error::Navigation(format!("navigation failed for {}: {}", url, e)))?;

        Ok(CdpPage { page })
    }

    pub async fn close(mut self) -> Result<(), Error> {
        self.browser
            .close()
            .await
            .map_err(|e| Error::Browser(format!("failed to close browser: {}", e)))?;
        Ok(())
    }
}

/// [`ListingPage`] over a live CDP page.
pub struct CdpPage {
    page: Page,
}

#[async_trait]
impl ListingPage for CdpPage {
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), Error> {
        let deadline = Instant::now() + timeout;
        loop {
            // Query errors while the DOM is still settling are treated the
            // same as "not there yet" and retried until the deadline.
            match self.page.find_elements(selector).await {
                Ok(elements) if !elements.is_empty() => return Ok(()),
                Ok(_) => debug!("Selector {} not present yet", selector),
                Err(e) => debug!("Selector poll for {} failed: {}", selector, e),
            }
            if Instant::now() >= deadline {
                return Err(Error::SelectorTimeout {
                    selector: selector.to_string(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn Tile>>, Error> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| Error::Navigation(format!("failed to enumerate {}: {}", selector, e)))?;
        Ok(elements
            .into_iter()
            .map(|element| Box::new(CdpTile { element }) as Box<dyn Tile>)
            .collect())
    }
}

/// [`Tile`] over a live CDP element handle.
pub struct CdpTile {
    element: Element,
}

#[async_trait]
impl Tile for CdpTile {
    async fn query_sub(&self, selector: &str) -> Result<Option<Box<dyn Tile>>, Error> {
        let matches = self
            .element
            .find_elements(selector)
            .await
            .map_err(|e| Error::Tile(format!("lookup of {} failed: {}", selector, e)))?;
        Ok(matches
            .into_iter()
            .next()
            .map(|element| Box::new(CdpTile { element }) as Box<dyn Tile>))
    }

    async fn text(&self) -> Result<Option<String>, Error> {
        self.element
            .inner_text()
            .await
            .map_err(|e| Error::Tile(format!("failed to read text: {}", e)))
    }
}
