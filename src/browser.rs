use std::sync::Arc;
use std::thread;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use scraper::Html;

/// Marker for the description block on a detail page: the list that
/// follows the "Job Description" label.
pub const DESCRIPTION_MARKER: &str = "//p[text()='Job Description']/following-sibling::ul";

const SETTLE_DELAY: Duration = Duration::from_secs(2);
const MARKER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to launch browser: {0}")]
    Launch(anyhow::Error),
    #[error("navigation to {url} failed: {cause}")]
    Navigation { url: String, cause: anyhow::Error },
    #[error("timed out waiting for description block on {url}")]
    MarkerTimeout { url: String },
}

/// Rendering boundary. The real implementation drives a headless
/// browser; tests substitute fixture documents.
pub trait Renderer {
    fn listing_page(&self, url: &str) -> Result<Html, RenderError>;
    fn detail_page(&self, url: &str) -> Result<Html, RenderError>;
}

/// One headless browser session, reused for every navigation within a
/// crawl cycle. Each call repoints the single shared tab, so the
/// session must not be driven from concurrent tasks. Dropping it closes
/// the browser.
pub struct ChromeSession {
    // Keeps the browser process alive for as long as the tab is in use.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    pub fn launch() -> Result<Self, RenderError> {
        let browser = Browser::new(LaunchOptions {
            headless: true,
            window_size: Some((1920, 1080)),
            ..Default::default()
        })
        .map_err(RenderError::Launch)?;
        let tab = browser.new_tab().map_err(RenderError::Launch)?;
        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    fn goto(&self, url: &str) -> Result<(), RenderError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|cause| RenderError::Navigation {
                url: url.to_owned(),
                cause,
            })?;
        // Settle time for client-side rendering.
        thread::sleep(SETTLE_DELAY);
        Ok(())
    }

    fn snapshot(&self, url: &str) -> Result<Html, RenderError> {
        let content = self
            .tab
            .get_content()
            .map_err(|cause| RenderError::Navigation {
                url: url.to_owned(),
                cause,
            })?;
        Ok(Html::parse_document(&content))
    }
}

impl Renderer for ChromeSession {
    fn listing_page(&self, url: &str) -> Result<Html, RenderError> {
        self.goto(url)?;
        self.snapshot(url)
    }

    fn detail_page(&self, url: &str) -> Result<Html, RenderError> {
        self.goto(url)?;
        self.tab
            .wait_for_xpath_with_custom_timeout(DESCRIPTION_MARKER, MARKER_TIMEOUT)
            .map_err(|_| RenderError::MarkerTimeout {
                url: url.to_owned(),
            })?;
        self.snapshot(url)
    }
}
