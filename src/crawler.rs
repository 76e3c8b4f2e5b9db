use anyhow::Result;
use tracing::{info, warn};

use crate::browser::{ChromeSession, Renderer};
use crate::config::Settings;
use crate::db::{self, NewJob};
use crate::extract;

pub struct CycleStats {
    pub pages: u32,
    pub candidates: usize,
    pub inserted: usize,
    pub total_stored: usize,
}

/// One full crawl cycle: every configured page, one batch commit. The
/// browser session and store connection both live exactly this long.
pub fn run_cycle(settings: &Settings) -> Result<CycleStats> {
    info!(base_url = %settings.base_url, pages = settings.page_count, "crawl cycle started");

    let conn = db::connect(&settings.db_path)?;
    db::init_schema(&conn)?;
    let session = ChromeSession::launch()?;

    let candidates = collect_candidates(&session, &settings.base_url, settings.page_count);
    let inserted = db::insert_missing(&conn, &candidates)?;
    let total_stored = db::count_jobs(&conn)?;

    info!(
        candidates = candidates.len(),
        inserted, total_stored, "crawl cycle finished"
    );

    Ok(CycleStats {
        pages: settings.page_count,
        candidates: candidates.len(),
        inserted,
        total_stored,
    })
}

/// Visit every configured page unconditionally; a failed or empty page
/// never short-circuits the rest.
pub fn collect_candidates(renderer: &dyn Renderer, base_url: &str, page_count: u32) -> Vec<NewJob> {
    let mut candidates = Vec::new();
    for page in 1..=page_count {
        let url = page_url(base_url, page);
        match extract::listings(renderer, &url) {
            Ok(found) => candidates.extend(found),
            Err(e) => warn!(page, error = %e, "page skipped"),
        }
    }
    candidates
}

/// Page 1 is the bare base URL; later pages carry a page query.
pub fn page_url(base_url: &str, page: u32) -> String {
    if page == 1 {
        base_url.to_string()
    } else {
        format!("{base_url}?page={page}")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use scraper::Html;

    use super::*;
    use crate::browser::RenderError;

    struct PageCounter {
        calls: Cell<u32>,
        fail_page: Option<u32>,
    }

    impl PageCounter {
        fn new(fail_page: Option<u32>) -> Self {
            Self {
                calls: Cell::new(0),
                fail_page,
            }
        }
    }

    impl Renderer for PageCounter {
        fn listing_page(&self, url: &str) -> Result<Html, RenderError> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if self.fail_page == Some(n) {
                return Err(RenderError::Navigation {
                    url: url.to_string(),
                    cause: anyhow::anyhow!("connection reset"),
                });
            }
            Ok(Html::parse_document("<html><body></body></html>"))
        }

        fn detail_page(&self, _url: &str) -> Result<Html, RenderError> {
            unreachable!("empty pages have no detail links")
        }
    }

    #[test]
    fn page_one_is_the_bare_base_url() {
        assert_eq!(page_url("https://example.com/", 1), "https://example.com/");
        assert_eq!(
            page_url("https://example.com/", 7),
            "https://example.com/?page=7"
        );
    }

    #[test]
    fn visits_every_configured_page_even_when_all_are_empty() {
        let renderer = PageCounter::new(None);
        let got = collect_candidates(&renderer, "https://example.com/", 19);
        assert_eq!(renderer.calls.get(), 19);
        assert!(got.is_empty());
    }

    #[test]
    fn a_failed_page_does_not_stop_the_crawl() {
        let renderer = PageCounter::new(Some(3));
        collect_candidates(&renderer, "https://example.com/", 19);
        assert_eq!(renderer.calls.get(), 19);
    }
}
