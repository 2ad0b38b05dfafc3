//! Accumulates stubs across pages, keyed by URL.

use crate::models::ArticleStub;
use std::collections::HashSet;

/// Insertion-ordered set of stubs with unique URLs.
#[derive(Debug, Default)]
pub struct Collector {
    seen: HashSet<String>,
    articles: Vec<ArticleStub>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `stub` unless its URL was already collected or its title or URL
    /// is blank. Returns whether the stub was admitted.
    pub fn add(&mut self, stub: ArticleStub) -> bool {
        if stub.title.trim().is_empty() || stub.url.trim().is_empty() {
            return false;
        }
        if !self.seen.insert(stub.url.clone()) {
            return false;
        }
        self.articles.push(stub);
        true
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// The collected stubs in discovery order.
    pub fn snapshot(&self) -> &[ArticleStub] {
        &self.articles
    }

    pub fn into_articles(self) -> Vec<ArticleStub> {
        self.articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stub(url: &str, page: u32) -> ArticleStub {
        ArticleStub {
            title: format!("Artículo {url}"),
            url: url.to_string(),
            image_url: None,
            post_code: None,
            page_found: page,
            extracted_at: Utc::now(),
        }
    }

    #[test]
    fn test_two_pages_with_overlap() {
        let page_one = ["/a", "/b", "/c", "/d", "/e"];
        let page_two = ["/d", "/e", "/f", "/g", "/h"];

        let mut collector = Collector::new();
        let first: usize = page_one
            .iter()
            .map(|u| collector.add(stub(u, 1)) as usize)
            .sum();
        let second: usize = page_two
            .iter()
            .map(|u| collector.add(stub(u, 2)) as usize)
            .sum();

        assert_eq!(first, 5);
        assert_eq!(second, 3);
        assert_eq!(collector.len(), 8);

        let urls: Vec<_> = collector.snapshot().iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["/a", "/b", "/c", "/d", "/e", "/f", "/g", "/h"]);
        // The first sighting wins.
        assert_eq!(collector.snapshot()[3].page_found, 1);
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let mut collector = Collector::new();

        let mut no_title = stub("/a", 1);
        no_title.title = "  ".to_string();
        assert!(!collector.add(no_title));

        let no_url = stub("", 1);
        assert!(!collector.add(no_url));

        assert!(collector.is_empty());
        // A rejected stub does not reserve its URL.
        assert!(collector.add(stub("/a", 1)));
    }
}
