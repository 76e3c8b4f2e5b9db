pub mod description;
pub mod fields;
pub mod posted;

use chrono::Utc;
use scraper::{Html, Selector};
use url::Url;

use crate::browser::{RenderError, Renderer};
use crate::db::NewJob;

/// Render one results page and assemble a candidate per listing card,
/// in page order. Only the listing page itself failing to render is an
/// error; everything per-card degrades to absent fields.
pub fn listings(renderer: &dyn Renderer, url: &str) -> Result<Vec<NewJob>, RenderError> {
    let doc = renderer.listing_page(url)?;
    Ok(assemble(renderer, url, &doc))
}

/// Candidate assembly over an already-rendered document.
pub fn assemble(renderer: &dyn Renderer, page_url: &str, doc: &Html) -> Vec<NewJob> {
    let card_sel = Selector::parse("article").unwrap();
    let base = Url::parse(page_url).ok();

    doc.select(&card_sel)
        .map(|card| {
            let raw = fields::extract(card);
            let created_at = raw
                .posted
                .as_deref()
                .map(posted::normalize)
                .unwrap_or_else(Utc::now);
            let description = raw
                .detail_url
                .as_deref()
                .and_then(|href| resolve(base.as_ref(), href))
                .and_then(|detail| description::fetch(renderer, detail.as_str()));
            NewJob {
                title: raw.title,
                company: raw.company,
                location: raw.location,
                description,
                category: raw.category,
                created_at,
            }
        })
        .collect()
}

fn resolve(base: Option<&Url>, href: &str) -> Option<Url> {
    match base {
        Some(base) => base.join(href).ok(),
        None => Url::parse(href).ok(),
    }
}

// ── Tests ──
