//! # Blog Digest
//!
//! Scrapes the paginated article index of a corporate blog, fabricates a short
//! summary and a category for every article, and publishes the result as
//! static JSON files for other sites to consume.
//!
//! ## Features
//!
//! - Walks the listing pages politely (fixed delays, one request at a time)
//!   and stops early after three consecutive failed pages
//! - Falls back to a built-in article list when nothing could be scraped
//! - Summarizes titles through an OpenAI-compatible API, or keyword templates
//!   when no API key is configured
//! - Publishes a full feed and a daily random selection
//!
//! ## Usage
//!
//! ```sh
//! blog_digest -o ./public generate
//! blog_digest -o ./public daily --count 3
//! ```
//!
//! ## Architecture
//!
//! 1. **Scraping**: listing pages → deduplicated article stubs ([`scrapers`])
//! 2. **Enrichment**: summary and category per stub ([`summary`], [`categories`])
//! 3. **Output**: feed document, then the daily rotation ([`outputs`], [`selection`])

use chrono::Utc;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod categories;
mod cli;
mod config;
mod models;
mod outputs;
mod scrapers;
mod selection;
mod summary;
mod utils;

use api::{OpenAiAsk, RetryAsk, client_from_config};
use cli::{Cli, Command};
use config::AppConfig;
use models::{DataSource, FinalDocument, ProcessedArticle};
use outputs::daily::{DailyRun, build_daily};
use outputs::feed::{FeedRun, build_feed};
use outputs::json;
use scrapers::fallback::fallback_articles;
use selection::select_daily;
use summary::Summarizer;
use utils::ensure_writable_dir;

/// Reported as the model name when no LLM produced any summary.
const TEMPLATE_MODEL: &str = "template";

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    info!("blog_digest starting up");

    let args = Cli::parse();
    debug!(?args.command, ?args.output_dir, ?args.config, "Parsed CLI arguments");

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path).await?,
        None => AppConfig::default(),
    };
    apply_overrides(&mut config, &args);

    if let Err(e) = ensure_writable_dir(&config.output.dir).await {
        error!(
            path = %config.output.dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let (mut rng, selection_method) = match args.seed {
        Some(seed) => (StdRng::seed_from_u64(seed), "seeded_shuffle"),
        None => (StdRng::from_os_rng(), "entropy_shuffle"),
    };

    match args.command {
        Command::Generate { skip_daily, .. } => {
            let feed = generate(&config, start_time).await?;
            if skip_daily {
                info!("Skipping daily selection");
            } else {
                write_daily(
                    &config,
                    &feed.data,
                    feed.metadata.data_source,
                    &mut rng,
                    selection_method,
                )
                .await?;
            }
        }
        Command::Daily { .. } => {
            let (articles, source) = daily_pool(&config).await;
            write_daily(&config, &articles, source, &mut rng, selection_method).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Fold command-line values into the loaded configuration.
fn apply_overrides(config: &mut AppConfig, args: &Cli) {
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(key) = &args.openai_api_key {
        config.openai.api_key = Some(key.clone());
    }

    match &args.command {
        Command::Generate {
            max_articles,
            max_pages,
            ..
        } => {
            if let Some(n) = max_articles {
                config.scrape.max_articles = *n;
            }
            if let Some(n) = max_pages {
                config.scrape.max_pages = *n;
            }
        }
        Command::Daily { count } => {
            if let Some(n) = count {
                config.daily.count = *n;
            }
        }
    }
}

/// Scrape, summarize and write the feed document.
#[instrument(level = "info", skip_all)]
async fn generate(config: &AppConfig, started: Instant) -> Result<FinalDocument, Box<dyn Error>> {
    let report = scrapers::collect_articles(&config.scrape).await;
    info!(
        articles = report.articles.len(),
        source = report.source.as_str(),
        pages_attempted = report.pages_attempted,
        pages_failed = report.pages_failed,
        breaker_tripped = report.breaker_tripped,
        "Scraping finished"
    );

    let client = match client_from_config(&config.openai) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Failed to build LLM client; using template summaries");
            None
        }
    };
    if client.is_none() {
        info!("No usable OpenAI API key; summaries will come from templates");
    }

    let summarizer = Summarizer::new(client);
    let ai_model = if summarizer.uses_ai() {
        config.openai.model.clone()
    } else {
        TEMPLATE_MODEL.to_string()
    };
    let auto_summaries_enabled = summarizer.uses_ai();

    let articles = summarizer
        .enrich(report.articles, report.source, config.openai.request_pause())
        .await;

    let run = FeedRun {
        source: report.source,
        ai_model,
        auto_summaries_enabled,
        scraping_source: config.scrape.base_url.clone(),
        max_articles: config.scrape.max_articles,
        max_pages: config.scrape.max_pages,
        elapsed: started.elapsed(),
        generated_at: Utc::now(),
    };
    let feed = build_feed(articles, &run);

    let path = config.output.feed_path();
    if let Err(e) = json::write_document(&feed, &path).await {
        error!(path = %path.display(), error = %e, "Failed to write feed JSON");
        return Err(e);
    }
    Ok(feed)
}

/// Articles to draw the daily selection from: the existing feed, or the
/// built-in list with template summaries when the feed cannot be read.
#[instrument(level = "info", skip_all)]
async fn daily_pool(config: &AppConfig) -> (Vec<ProcessedArticle>, DataSource) {
    let path = config.output.feed_path();
    match json::load_feed(&path).await {
        Ok(feed) if !feed.data.is_empty() => {
            let source = feed.metadata.data_source;
            (feed.data, source)
        }
        Ok(_) => {
            warn!(path = %path.display(), "Feed has no articles; using fallback list");
            (fallback_pool().await, DataSource::Fallback)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Feed unavailable; using fallback list");
            (fallback_pool().await, DataSource::Fallback)
        }
    }
}

async fn fallback_pool() -> Vec<ProcessedArticle> {
    Summarizer::<RetryAsk<OpenAiAsk>>::new(None)
        .enrich(fallback_articles(), DataSource::Fallback, Duration::ZERO)
        .await
}

#[instrument(level = "info", skip_all, fields(count = config.daily.count))]
async fn write_daily(
    config: &AppConfig,
    articles: &[ProcessedArticle],
    source: DataSource,
    rng: &mut StdRng,
    selection_method: &str,
) -> Result<(), Box<dyn Error>> {
    let now = Utc::now();
    let picks = select_daily(articles, config.daily.count, rng, now);
    let run = DailyRun {
        source,
        parent_source: &config.output.feed_file,
        articles_per_day: config.daily.count,
        total_available: articles.len(),
        selection_method,
        generated_at: now,
    };
    let document = build_daily(picks, &run);

    let path = config.output.daily_path();
    if let Err(e) = json::write_document(&document, &path).await {
        error!(path = %path.display(), error = %e, "Failed to write daily JSON");
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_to_generate() {
        let args = Cli::parse_from([
            "blog_digest",
            "-o",
            "/tmp/digest",
            "--openai-api-key",
            "sk-cli",
            "generate",
            "--max-articles",
            "10",
            "--max-pages",
            "2",
        ]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &args);

        assert_eq!(config.output.dir, "/tmp/digest");
        assert_eq!(config.openai.usable_key(), Some("sk-cli"));
        assert_eq!(config.scrape.max_articles, 10);
        assert_eq!(config.scrape.max_pages, 2);
        assert_eq!(config.daily.count, 3);
    }

    #[test]
    fn test_overrides_leave_config_when_absent() {
        let args = Cli::parse_from(["blog_digest", "daily", "--count", "5"]);
        let mut config = AppConfig::default();
        config.output.dir = "./from-file".to_string();
        apply_overrides(&mut config, &args);

        assert_eq!(config.output.dir, "./from-file");
        assert_eq!(config.daily.count, 5);
        assert_eq!(config.scrape.max_articles, 300);
    }

    #[tokio::test]
    async fn test_daily_pool_uses_fallback_without_feed() {
        let mut config = AppConfig::default();
        config.output.dir = std::env::temp_dir()
            .join(format!("blog_digest_no_feed_{}", std::process::id()))
            .to_string_lossy()
            .into_owned();

        let (articles, source) = daily_pool(&config).await;
        assert_eq!(source, DataSource::Fallback);
        assert_eq!(articles.len(), fallback_articles().len());
        assert!(articles.iter().all(|a| !a.ai_generated));
        assert!(articles.iter().all(|a| a.source == DataSource::Fallback));
    }

    #[tokio::test]
    async fn test_daily_written_from_fallback_pool() {
        let dir = std::env::temp_dir().join(format!("blog_digest_daily_{}", std::process::id()));
        let mut config = AppConfig::default();
        config.output.dir = dir.to_string_lossy().into_owned();

        let (articles, source) = daily_pool(&config).await;
        let mut rng = StdRng::seed_from_u64(3);
        write_daily(&config, &articles, source, &mut rng, "seeded_shuffle")
            .await
            .unwrap();

        let raw = std::fs::read_to_string(config.output.daily_path()).unwrap();
        let doc: models::DailyNewsDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc.daily_news.len(), 3);
        assert_eq!(doc.metadata.data_source, DataSource::Fallback);
        assert_eq!(doc.statistics.total_available_articles, articles.len());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
