//! The main feed document.

use super::{LANGUAGE, SOURCE_NAME, avg_summary_length, categories_in_order};
use crate::models::{
    DataSource, FeedConfiguration, FeedMetadata, FeedStatistics, FinalDocument, ProcessedArticle,
};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::info;

const FEED_TITLE: &str = "ISOTools - Artículos Procesados con IA";
const FEED_VERSION: &str = "2.0.0";

/// Facts about the run that produced the articles.
#[derive(Debug, Clone)]
pub struct FeedRun {
    pub source: DataSource,
    /// Model name, or a marker when summaries came from templates only.
    pub ai_model: String,
    pub auto_summaries_enabled: bool,
    pub scraping_source: String,
    pub max_articles: usize,
    pub max_pages: u32,
    pub elapsed: Duration,
    pub generated_at: DateTime<Utc>,
}

/// `"NN%"` of AI summaries, rounded, `"0%"` for an empty feed.
pub fn success_rate(successful: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{}%", (successful as f64 * 100.0 / total as f64).round() as u64)
}

pub fn build_feed(articles: Vec<ProcessedArticle>, run: &FeedRun) -> FinalDocument {
    let successful = articles.iter().filter(|a| a.ai_generated).count();
    let categories = categories_in_order(&articles);

    let statistics = FeedStatistics {
        total_processed: articles.len(),
        successful_ai_summaries: successful,
        ai_success_rate: success_rate(successful, articles.len()),
        avg_summary_length: avg_summary_length(&articles),
        total_categories: categories.len(),
        categories_identified: categories,
        processing_time_seconds: run.elapsed.as_secs_f64().round() as u64,
        last_updated: run.generated_at,
    };

    info!(
        total = statistics.total_processed,
        ai = statistics.successful_ai_summaries,
        rate = %statistics.ai_success_rate,
        categories = statistics.total_categories,
        "Feed statistics computed"
    );

    FinalDocument {
        metadata: FeedMetadata {
            title: FEED_TITLE.to_string(),
            source: SOURCE_NAME.to_string(),
            generated_at: run.generated_at,
            total_articles: articles.len(),
            ai_model: run.ai_model.clone(),
            version: FEED_VERSION.to_string(),
            scraping_source: run.scraping_source.clone(),
            pagination_enabled: true,
            max_pages_scraped: run.max_pages,
            language: LANGUAGE.to_string(),
            data_source: run.source,
        },
        configuration: FeedConfiguration {
            auto_summaries_enabled: run.auto_summaries_enabled,
            ai_summaries_generated: successful,
            max_articles_processed: run.max_articles,
            max_pages_scraped: run.max_pages,
            categories_auto_assigned: true,
            fallback_data_available: true,
        },
        data: articles,
        statistics,
    }
}
