//! Blog listing scraper.
//!
//! The pipeline discovers article stubs from the paginated blog index:
//!
//! | Stage | Module | Notes |
//! |-------|--------|-------|
//! | Fetch | [`fetcher`] | One GET per page, fixed User-Agent and timeout, no retries |
//! | Parse | [`parser`] | Post cards → title, URL, image, `post-` marker |
//! | Collect | [`collector`] | URL-keyed dedup in discovery order |
//! | Paginate | [`paginator`] | Page loop, delays, 3-strike circuit breaker |
//! | Fallback | [`fallback`] | Static list used when nothing was scraped |
//!
//! Scraping never fails the caller: whatever goes wrong, [`collect_articles`]
//! returns some list, tagged live or fallback.

pub mod collector;
pub mod fallback;
pub mod fetcher;
pub mod paginator;
pub mod parser;

use crate::config::ScrapeConfig;
use fetcher::HttpFetcher;
use paginator::{PaginationSettings, Paginator, ScrapeReport};
use tracing::{error, instrument};

/// Run the whole scraping pipeline against the configured blog.
#[instrument(level = "info", skip_all, fields(base_url = %config.base_url))]
pub async fn collect_articles(config: &ScrapeConfig) -> ScrapeReport {
    let settings = match PaginationSettings::from_config(config) {
        Ok(settings) => settings,
        Err(e) => {
            error!(
                origin = %config.origin,
                error = %e,
                "Invalid scrape origin; using fallback list"
            );
            return ScrapeReport::fallback(config.max_articles);
        }
    };

    let fetcher = match HttpFetcher::new(&config.user_agent, config.timeout()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!(error = %e, "Failed to build HTTP client; using fallback list");
            return ScrapeReport::fallback(config.max_articles);
        }
    };

    Paginator::new(fetcher, settings).run().await
}
