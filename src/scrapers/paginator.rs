//! Pagination driver with a consecutive-failure circuit breaker.
//!
//! Pages are fetched strictly one at a time, starting at page 1:
//!
//! ```text
//! Fetching(p) --ok--> [parse + collect] --> Fetching(p+1) | Done
//! Fetching(p) --err-> Backoff(p, n) --> Fetching(p+1) | Done
//!                      n == 3 ------> Done (breaker)
//! ```
//!
//! A successful page resets the failure counter and is followed by the page
//! delay; a failed page is skipped, not retried, after the backoff delay. The
//! run ends at `max_pages`, once `max_articles` have been collected, or when the
//! breaker trips. An empty run is replaced by the fallback list.

use super::collector::Collector;
use super::fallback::fallback_articles;
use super::fetcher::PageFetcher;
use super::parser::ListingPage;
use crate::config::ScrapeConfig;
use crate::models::{ArticleStub, DataSource};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Consecutive fetch failures that abort the whole run.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// Everything the driver needs from the configuration, resolved once.
#[derive(Debug, Clone)]
pub struct PaginationSettings {
    pub base_url: String,
    pub origin: Url,
    pub max_pages: u32,
    pub max_articles: usize,
    pub page_delay: Duration,
    pub backoff_delay: Duration,
}

impl PaginationSettings {
    pub fn from_config(config: &ScrapeConfig) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            base_url: config.base_url.clone(),
            origin: Url::parse(&config.origin)?,
            max_pages: config.max_pages,
            max_articles: config.max_articles,
            page_delay: config.page_delay(),
            backoff_delay: config.backoff_delay(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fetching(u32),
    Backoff { page: u32, failures: u32 },
    Done,
}

/// Outcome of one scraping run.
#[derive(Debug)]
pub struct ScrapeReport {
    /// Discovery-ordered, URL-unique, at most `max_articles` long.
    pub articles: Vec<ArticleStub>,
    pub source: DataSource,
    pub pages_attempted: u32,
    pub pages_failed: u32,
    pub breaker_tripped: bool,
}

impl ScrapeReport {
    /// A report made only of fallback data, for runs that could not start.
    pub fn fallback(max_articles: usize) -> Self {
        let mut articles = fallback_articles();
        articles.truncate(max_articles);
        Self {
            articles,
            source: DataSource::Fallback,
            pages_attempted: 0,
            pages_failed: 0,
            breaker_tripped: false,
        }
    }
}

/// Listing URL for `page`: the base itself for page 1, `{base}page/{n}/` after.
pub fn page_url(base_url: &str, page: u32) -> String {
    if page <= 1 {
        return base_url.to_string();
    }
    format!("{}/page/{}/", base_url.trim_end_matches('/'), page)
}

pub struct Paginator<F> {
    fetcher: F,
    settings: PaginationSettings,
}

impl<F: PageFetcher> Paginator<F> {
    pub fn new(fetcher: F, settings: PaginationSettings) -> Self {
        Self { fetcher, settings }
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Drive the pagination state machine to completion.
    #[instrument(level = "info", skip_all, fields(base_url = %self.settings.base_url))]
    pub async fn run(&self) -> ScrapeReport {
        let settings = &self.settings;
        let mut collector = Collector::new();
        let mut consecutive_failures = 0u32;
        let mut pages_attempted = 0u32;
        let mut pages_failed = 0u32;
        let mut breaker_tripped = false;

        let mut state = if settings.max_pages == 0 || settings.max_articles == 0 {
            State::Done
        } else {
            State::Fetching(1)
        };

        info!(
            max_pages = settings.max_pages,
            max_articles = settings.max_articles,
            "Starting pagination"
        );

        loop {
            state = match state {
                State::Fetching(page) => {
                    let url = page_url(&settings.base_url, page);
                    pages_attempted += 1;
                    debug!(page, %url, "Fetching listing page");

                    match self.fetcher.fetch(&url).await {
                        Ok(body) => {
                            consecutive_failures = 0;
                            let admitted =
                                collect_page(&body, &settings.origin, page, &mut collector);
                            let total = collector.snapshot().len();
                            info!(page, new = admitted, total, "Scraped listing page");

                            if page >= settings.max_pages || total >= settings.max_articles {
                                State::Done
                            } else {
                                sleep(settings.page_delay).await;
                                State::Fetching(page + 1)
                            }
                        }
                        Err(e) => {
                            consecutive_failures += 1;
                            pages_failed += 1;
                            warn!(
                                page,
                                %url,
                                error = %e,
                                consecutive_failures,
                                "Listing page fetch failed; skipping page"
                            );
                            State::Backoff {
                                page,
                                failures: consecutive_failures,
                            }
                        }
                    }
                }
                State::Backoff { page, failures } => {
                    if failures >= MAX_CONSECUTIVE_FAILURES {
                        error!(
                            page,
                            failures,
                            "Too many consecutive fetch failures; aborting pagination"
                        );
                        breaker_tripped = true;
                        State::Done
                    } else if page >= settings.max_pages {
                        State::Done
                    } else {
                        sleep(settings.backoff_delay).await;
                        State::Fetching(page + 1)
                    }
                }
                State::Done => break,
            };
        }

        let (mut articles, source) = if collector.is_empty() {
            warn!(
                pages_attempted,
                pages_failed, "Scrape produced no articles; substituting fallback list"
            );
            (fallback_articles(), DataSource::Fallback)
        } else {
            (collector.into_articles(), DataSource::Live)
        };
        articles.truncate(settings.max_articles);

        info!(
            count = articles.len(),
            source = source.as_str(),
            pages_attempted,
            pages_failed,
            breaker_tripped,
            "Pagination finished"
        );

        ScrapeReport {
            articles,
            source,
            pages_attempted,
            pages_failed,
            breaker_tripped,
        }
    }
}

/// Parse one listing page and feed its entries to the collector. Returns how
/// many were admitted.
fn collect_page(body: &str, origin: &Url, page: u32, collector: &mut Collector) -> usize {
    let entries: Vec<_> = ListingPage::parse(body, origin).entries().collect();
    if entries.is_empty() {
        warn!(page, "No post cards found on listing page");
        return 0;
    }

    entries
        .into_iter()
        .filter_map(|entry| entry.into_stub(page))
        .map(|stub| collector.add(stub))
        .filter(|admitted| *admitted)
        .count()
}
