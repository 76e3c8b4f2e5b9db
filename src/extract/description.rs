use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::browser::Renderer;

/// Fetch the long-form description from a detail page. Timeouts,
/// navigation failures and a missing block all degrade to `None`.
pub fn fetch(renderer: &dyn Renderer, url: &str) -> Option<String> {
    match renderer.detail_page(url) {
        Ok(doc) => block_text(&doc),
        Err(e) => {
            debug!(url, error = %e, "detail page unavailable");
            None
        }
    }
}

/// The description block is the first list following the paragraph
/// labeled "Job Description".
pub fn block_text(doc: &Html) -> Option<String> {
    let p_sel = Selector::parse("p").unwrap();
    let li_sel = Selector::parse("li").unwrap();

    let label = doc
        .select(&p_sel)
        .find(|p| p.text().collect::<String>().trim() == "Job Description")?;

    let mut node = label.next_sibling();
    while let Some(current) = node {
        if let Some(el) = ElementRef::wrap(current) {
            if el.value().name() == "ul" {
                let items: Vec<String> = el
                    .select(&li_sel)
                    .map(|li| li.text().collect::<String>().trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                let text = if items.is_empty() {
                    el.text().collect::<String>().trim().to_string()
                } else {
                    items.join("\n")
                };
                return Some(text).filter(|t| !t.is_empty());
            }
        }
        node = current.next_sibling();
    }
    None
}
