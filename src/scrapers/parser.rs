//! Listing-page extraction.
//!
//! A listing page contains one card per post:
//!
//! ```html
//! <div class="wpex-post-cards-entry post-12345 ...">
//!   <img data-lazy-src="/wp-content/uploads/cover.jpg">
//!   <h2 class="wpex-card-title"><a href="https://.../slug/">Title</a></h2>
//! </div>
//! ```
//!
//! Only cards whose class list carries a `post-` token are considered. Malformed
//! HTML never fails here; it simply yields zero entries.

use crate::models::ArticleStub;
use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Placeholder title for cards without heading text.
pub const UNTITLED: &str = "Sin título";

const POST_MARKER_PREFIX: &str = "post-";

static CARD: Lazy<Selector> = Lazy::new(|| Selector::parse("div.wpex-post-cards-entry").unwrap());
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("h2.wpex-card-title a").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Image attributes in priority order. `srcset` is handled separately.
const LAZY_IMAGE_ATTRS: [&str; 2] = ["data-lazy-src", "data-src"];

/// A parsed listing page.
///
/// Holds the document tree so [`ListingPage::entries`] can be iterated any
/// number of times.
pub struct ListingPage {
    document: Html,
    origin: Url,
}

/// Raw fields extracted from one post card.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub title: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub post_code: Option<String>,
}

impl ListingEntry {
    /// Turn the entry into a stub found on `page`. Entries without a link are
    /// dropped.
    pub fn into_stub(self, page: u32) -> Option<ArticleStub> {
        let url = self.url?;
        Some(ArticleStub {
            title: self.title,
            url,
            image_url: self.image_url,
            post_code: self.post_code,
            page_found: page,
            extracted_at: Utc::now(),
        })
    }
}

impl ListingPage {
    pub fn parse(html: &str, origin: &Url) -> Self {
        Self {
            document: Html::parse_document(html),
            origin: origin.clone(),
        }
    }

    /// Post cards in document order.
    pub fn entries(&self) -> impl Iterator<Item = ListingEntry> + '_ {
        self.document
            .select(&CARD)
            .filter_map(|card| post_marker(&card).map(|marker| (card, marker)))
            .map(|(card, marker)| self.extract(card, marker))
    }

    fn extract(&self, card: ElementRef<'_>, marker: &str) -> ListingEntry {
        let link = card.select(&TITLE_LINK).next();

        let title = link
            .map(|a| a.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        let url = link
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| resolve(&self.origin, href));

        let image_url = card
            .select(&IMAGE)
            .next()
            .and_then(image_source)
            .and_then(|src| resolve(&self.origin, &src));

        ListingEntry {
            title,
            url,
            image_url,
            post_code: Some(marker.to_string()),
        }
    }
}

/// First `post-` token of the card's class list.
fn post_marker<'a>(card: &ElementRef<'a>) -> Option<&'a str> {
    card.value()
        .classes()
        .find(|class| class.starts_with(POST_MARKER_PREFIX))
}

/// Pick the image URL: lazy-load attributes first, then the first `srcset`
/// candidate, then plain `src`.
fn image_source(img: ElementRef<'_>) -> Option<String> {
    let attr = |name: &str| {
        img.value()
            .attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(src) = LAZY_IMAGE_ATTRS.iter().find_map(|name| attr(name)) {
        return Some(src.to_string());
    }
    if let Some(srcset) = attr("srcset") {
        let first = srcset
            .split(',')
            .next()
            .and_then(|candidate| candidate.split_whitespace().next());
        if let Some(first) = first {
            return Some(first.to_string());
        }
    }
    attr("src").map(str::to_string)
}

/// Absolute links pass through; anything else is joined onto the origin.
fn resolve(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let path = if href.starts_with('/') {
        href.to_string()
    } else {
        format!("/{href}")
    };
    origin.join(&path).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.isotools.us";

    fn origin() -> Url {
        Url::parse(ORIGIN).unwrap()
    }

    fn card(post: u32, href: &str, title: &str) -> String {
        format!(
            r#"<div class="wpex-post-cards-entry post-{post} entry has-media">
                 <div class="wpex-card-media"><img src="/wp-content/uploads/{post}.jpg"></div>
                 <h2 class="wpex-card-title"><a href="{href}">{title}</a></h2>
               </div>"#
        )
    }

    const FIVE_CARDS: &str = r#"
<html><body><div class="wpex-post-cards-grid">
  <div class="wpex-post-cards-entry post-101 entry">
    <h2 class="wpex-card-title"><a href="https://www.isotools.us/2025/09/25/iso-42001/">  ISO 42001 y la IA  </a></h2>
  </div>
  <div class="wpex-post-cards-entry post-102 entry">
    <h2 class="wpex-card-title"><a href="https://www.isotools.us/2025/09/23/calidad-5-0/">Calidad 5.0</a></h2>
  </div>
  <div class="wpex-post-cards-entry post-103 entry">
    <h2 class="wpex-card-title"><a href="https://www.isotools.us/2025/09/16/iso-27001/">ISO 27001</a></h2>
  </div>
  <div class="wpex-post-cards-entry post-104 entry">
    <h2 class="wpex-card-title"><a href="https://www.isotools.us/2025/09/15/iso-9001-2026/">ISO 9001 2026</a></h2>
  </div>
  <div class="wpex-post-cards-entry post-105 entry">
    <h2 class="wpex-card-title"><a href="/blog/test/">Entrada relativa</a></h2>
  </div>
</div></body></html>"#;

    #[test]
    fn test_five_cards_with_relative_link() {
        let page = ListingPage::parse(FIVE_CARDS, &origin());
        let entries: Vec<_> = page.entries().collect();

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].title, "ISO 42001 y la IA");
        assert_eq!(
            entries[4].url.as_deref(),
            Some("https://www.isotools.us/blog/test/")
        );
        assert_eq!(entries[4].post_code.as_deref(), Some("post-105"));
        assert!(entries.iter().all(|e| e.image_url.is_none()));
    }

    #[test]
    fn test_entries_is_restartable() {
        let page = ListingPage::parse(FIVE_CARDS, &origin());
        let first: Vec<_> = page.entries().collect();
        let second: Vec<_> = page.entries().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cards_without_post_marker_are_skipped() {
        let html = format!(
            r#"<div class="wpex-post-cards-entry entry"><h2 class="wpex-card-title"><a href="/a/">A</a></h2></div>{}"#,
            card(7, "/b/", "B")
        );
        let page = ListingPage::parse(&html, &origin());
        let entries: Vec<_> = page.entries().collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "B");
        assert_eq!(entries[0].post_code.as_deref(), Some("post-7"));
    }

    #[test]
    fn test_missing_title_uses_placeholder() {
        let html = r#"<div class="wpex-post-cards-entry post-9">
            <h2 class="wpex-card-title"><a href="https://www.isotools.us/x/">   </a></h2>
        </div>"#;
        let page = ListingPage::parse(html, &origin());
        let entry = page.entries().next().unwrap();

        assert_eq!(entry.title, UNTITLED);
        assert_eq!(entry.url.as_deref(), Some("https://www.isotools.us/x/"));
    }

    #[test]
    fn test_missing_link_has_no_url_and_no_stub() {
        let html = r#"<div class="wpex-post-cards-entry post-9"><p>sin enlace</p></div>"#;
        let page = ListingPage::parse(html, &origin());
        let entry = page.entries().next().unwrap();

        assert_eq!(entry.title, UNTITLED);
        assert_eq!(entry.url, None);
        assert!(entry.into_stub(1).is_none());
    }

    #[test]
    fn test_image_priority() {
        let html = r#"
<div class="wpex-post-cards-entry post-1">
  <img data-lazy-src="/lazy.jpg" data-src="/data.jpg" srcset="/set-1.jpg 300w, /set-2.jpg 600w" src="/plain.jpg">
  <h2 class="wpex-card-title"><a href="/one/">One</a></h2>
</div>
<div class="wpex-post-cards-entry post-2">
  <img data-src="https://cdn.example.com/data.jpg" src="/plain.jpg">
  <h2 class="wpex-card-title"><a href="/two/">Two</a></h2>
</div>
<div class="wpex-post-cards-entry post-3">
  <img srcset="/set-1.jpg 300w, /set-2.jpg 600w" src="/plain.jpg">
  <h2 class="wpex-card-title"><a href="/three/">Three</a></h2>
</div>
<div class="wpex-post-cards-entry post-4">
  <img data-lazy-src="" src="uploads/plain.jpg">
  <h2 class="wpex-card-title"><a href="/four/">Four</a></h2>
</div>"#;
        let page = ListingPage::parse(html, &origin());
        let images: Vec<_> = page.entries().map(|e| e.image_url).collect();

        assert_eq!(
            images,
            vec![
                Some("https://www.isotools.us/lazy.jpg".to_string()),
                Some("https://cdn.example.com/data.jpg".to_string()),
                Some("https://www.isotools.us/set-1.jpg".to_string()),
                Some("https://www.isotools.us/uploads/plain.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_html_yields_nothing() {
        let page = ListingPage::parse("<<<div class=>>></p></html", &origin());
        assert_eq!(page.entries().count(), 0);

        let page = ListingPage::parse("", &origin());
        assert_eq!(page.entries().count(), 0);
    }

    #[test]
    fn test_into_stub_records_page() {
        let page = ListingPage::parse(&card(42, "/p/", "Título"), &origin());
        let stub = page.entries().next().unwrap().into_stub(4).unwrap();

        assert_eq!(stub.page_found, 4);
        assert_eq!(stub.url, "https://www.isotools.us/p/");
        assert_eq!(
            stub.image_url.as_deref(),
            Some("https://www.isotools.us/wp-content/uploads/42.jpg")
        );
    }
}
