use scraper::{ElementRef, Selector};

// Class selectors for the listing-card markup.
const TITLE: &str = ".Job_job-card__position__ic1rc";
const COMPANY: &str = ".Job_job-card__company__7T9qY";
const LOCATION: &str = ".Job_job-card__country__GRVhK";
const POSTED: &str = ".Job_job-card__posted-on__NCZaJ";
const TAGS: &str = ".Job_job-card__tags__zfriA";
const CATEGORY: &str = ".Job_job-card__location__bq7jX";
const DETAIL_LINK: &str = ".Job_job-page-link__a5I5g";

/// Raw per-field values from one listing card. Every lookup is
/// independent; a missing element leaves only its own field empty.
#[derive(Debug)]
pub struct RawFields {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub posted: Option<String>,
    pub category: Option<String>,
    pub detail_url: Option<String>,
}

pub fn extract(card: ElementRef) -> RawFields {
    RawFields {
        title: text_of(card, TITLE),
        company: text_of(card, COMPANY),
        location: text_of(card, LOCATION),
        posted: text_of(card, POSTED),
        category: category(card),
        detail_url: href_of(card, DETAIL_LINK),
    }
}

/// First match of `selector` under `card`, as trimmed non-empty text.
fn text_of(card: ElementRef, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    card.select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Category sits inside the tags container, styled like a location tag.
/// Either level missing means no category.
fn category(card: ElementRef) -> Option<String> {
    let tags = Selector::parse(TAGS).ok()?;
    let container = card.select(&tags).next()?;
    text_of(container, CATEGORY)
}

fn href_of(card: ElementRef, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    card.select(&sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    fn card(html: &str) -> RawFields {
        let doc = Html::parse_document(html);
        let sel = Selector::parse("article").unwrap();
        extract(doc.select(&sel).next().unwrap())
    }

    #[test]
    fn full_card_extracts_every_field() {
        let f = card(
            r#"<article>
                <p class="Job_job-card__position__ic1rc">Actuary I</p>
                <p class="Job_job-card__company__7T9qY">Acme</p>
                <p class="Job_job-card__country__GRVhK">USA</p>
                <p class="Job_job-card__posted-on__NCZaJ">2h ago</p>
                <div class="Job_job-card__tags__zfriA">
                    <span class="Job_job-card__location__bq7jX">Health</span>
                </div>
                <a class="Job_job-page-link__a5I5g" href="/jobs/1">View</a>
            </article>"#,
        );
        assert_eq!(f.title.as_deref(), Some("Actuary I"));
        assert_eq!(f.company.as_deref(), Some("Acme"));
        assert_eq!(f.location.as_deref(), Some("USA"));
        assert_eq!(f.posted.as_deref(), Some("2h ago"));
        assert_eq!(f.category.as_deref(), Some("Health"));
        assert_eq!(f.detail_url.as_deref(), Some("/jobs/1"));
    }

    #[test]
    fn missing_company_leaves_other_fields_intact() {
        let f = card(
            r#"<article>
                <p class="Job_job-card__position__ic1rc">Actuary I</p>
                <p class="Job_job-card__country__GRVhK">USA</p>
                <p class="Job_job-card__posted-on__NCZaJ">2h ago</p>
            </article>"#,
        );
        assert_eq!(f.company, None);
        assert_eq!(f.title.as_deref(), Some("Actuary I"));
        assert_eq!(f.location.as_deref(), Some("USA"));
        assert_eq!(f.posted.as_deref(), Some("2h ago"));
    }

    #[test]
    fn category_requires_the_tags_container() {
        // A location-styled tag outside the tags container does not count.
        let f = card(
            r#"<article>
                <span class="Job_job-card__location__bq7jX">Health</span>
            </article>"#,
        );
        assert_eq!(f.category, None);
    }

    #[test]
    fn empty_text_counts_as_missing() {
        let f = card(
            r#"<article>
                <p class="Job_job-card__position__ic1rc">   </p>
            </article>"#,
        );
        assert_eq!(f.title, None);
    }

    #[test]
    fn bare_card_yields_nothing() {
        let f = card("<article></article>");
        assert!(f.title.is_none());
        assert!(f.company.is_none());
        assert!(f.location.is_none());
        assert!(f.posted.is_none());
        assert!(f.category.is_none());
        assert!(f.detail_url.is_none());
    }
}
