//! Data models for scraped blog entries and the published feed documents.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleStub`]: A blog entry as discovered on a listing page, before enrichment
//! - [`DataSource`]: Whether a record came from a live scrape or the static fallback list
//! - [`ProcessedArticle`]: A stub enriched with a summary and a category
//! - [`FinalDocument`] / [`DailyNewsDocument`]: The JSON files consumed by other sites
//!
//! Field names use snake_case to match the JSON shape already consumed
//! downstream (`image_url`, `page_found`, `ai_summary`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog entry discovered on a listing page, prior to any enrichment.
///
/// Stubs are created once per qualifying element during a page parse and are
/// never mutated afterwards; enrichment builds a [`ProcessedArticle`] on top.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleStub {
    /// Trimmed title text; never empty.
    pub title: String,
    /// Absolute article URL. Unique within a single scraping run.
    pub url: String,
    /// Absolute image URL, if the card carried one.
    pub image_url: Option<String>,
    /// The `post-NNNN` class token of the card. Diagnostic only, not identity.
    pub post_code: Option<String>,
    /// Pagination index (1-based) where the entry was discovered.
    pub page_found: u32,
    /// Capture time.
    pub extracted_at: DateTime<Utc>,
}

/// Where a list of articles came from.
///
/// Consumers of the published JSON use this to tell authoritative, freshly
/// scraped content apart from the static fallback list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Fallback => "fallback",
        }
    }
}

/// An article after summary fabrication and categorization.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProcessedArticle {
    /// 1-based position in the published feed.
    pub id: usize,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub post_code: Option<String>,
    /// The fabricated summary (LLM output or keyword template).
    pub ai_summary: String,
    /// Summary length in characters.
    pub summary_length: usize,
    pub category: String,
    /// `true` only when the summary came back from the LLM.
    pub ai_generated: bool,
    pub page_found: u32,
    pub extracted_at: DateTime<Utc>,
    pub processed_at: DateTime<Utc>,
    pub source: DataSource,
}

/// Descriptive header of the main feed file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedMetadata {
    pub title: String,
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub total_articles: usize,
    pub ai_model: String,
    pub version: String,
    pub scraping_source: String,
    pub pagination_enabled: bool,
    pub max_pages_scraped: u32,
    pub language: String,
    /// `live` when the scrape produced data, `fallback` when the static list was used.
    pub data_source: DataSource,
}

/// Run parameters echoed into the feed so consumers can see how it was produced.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedConfiguration {
    pub auto_summaries_enabled: bool,
    pub ai_summaries_generated: usize,
    pub max_articles_processed: usize,
    pub max_pages_scraped: u32,
    pub categories_auto_assigned: bool,
    pub fallback_data_available: bool,
}

/// Aggregate numbers over the published articles.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedStatistics {
    pub total_processed: usize,
    pub successful_ai_summaries: usize,
    /// Percentage rendered as `"NN%"`.
    pub ai_success_rate: String,
    pub avg_summary_length: usize,
    pub categories_identified: Vec<String>,
    pub total_categories: usize,
    pub processing_time_seconds: u64,
    pub last_updated: DateTime<Utc>,
}

/// The main feed file (`isotools-final-data.json` by default).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FinalDocument {
    pub metadata: FeedMetadata,
    pub configuration: FeedConfiguration,
    pub data: Vec<ProcessedArticle>,
    pub statistics: FeedStatistics,
}

/// One article chosen for the daily news rotation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DailyPick {
    #[serde(flatten)]
    pub article: ProcessedArticle,
    /// 1-based display priority.
    pub news_priority: usize,
    pub selected_date: DateTime<Utc>,
    /// `YYYY-MM-DD-N`.
    pub rotation_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DailyMetadata {
    pub title: String,
    pub description: String,
    pub source: String,
    pub generated_date: String,
    pub generated_at: DateTime<Utc>,
    pub next_update: String,
    pub total_articles: usize,
    pub rotation_type: String,
    pub version: String,
    pub parent_source: String,
    pub language: String,
    pub data_source: DataSource,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DailyConfiguration {
    pub daily_rotation: bool,
    pub articles_per_day: usize,
    pub selection_method: String,
    pub cache_duration_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DailyStatistics {
    pub total_selected: usize,
    pub total_available_articles: usize,
    pub categories_today: Vec<String>,
    pub avg_summary_length: usize,
    pub selection_date: String,
    pub rotation_id: String,
}

/// The daily rotation file (`isotools-daily-news.json` by default).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DailyNewsDocument {
    pub metadata: DailyMetadata,
    pub configuration: DailyConfiguration,
    pub daily_news: Vec<DailyPick>,
    pub statistics: DailyStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_article() -> ProcessedArticle {
        let at = Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap();
        ProcessedArticle {
            id: 1,
            title: "Cumplimiento ISO 27001".to_string(),
            url: "https://www.isotools.us/2025/09/16/cumplimiento-iso-27001/".to_string(),
            image_url: None,
            post_code: Some("post-1234".to_string()),
            ai_summary: "Resumen".to_string(),
            summary_length: 7,
            category: "ISO_27001_Seguridad_Informacion".to_string(),
            ai_generated: false,
            page_found: 1,
            extracted_at: at,
            processed_at: at,
            source: DataSource::Fallback,
        }
    }

    #[test]
    fn test_data_source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DataSource::Live).unwrap(), "\"live\"");
        assert_eq!(
            serde_json::from_str::<DataSource>("\"fallback\"").unwrap(),
            DataSource::Fallback
        );
        assert_eq!(DataSource::Fallback.as_str(), "fallback");
    }

    #[test]
    fn test_processed_article_keeps_null_image() {
        let json = serde_json::to_value(sample_article()).unwrap();
        assert!(json["image_url"].is_null());
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["page_found"], 1);
    }

    #[test]
    fn test_daily_pick_flattens_article_fields() {
        let pick = DailyPick {
            article: sample_article(),
            news_priority: 2,
            selected_date: Utc.with_ymd_and_hms(2025, 10, 3, 6, 0, 0).unwrap(),
            rotation_id: "2025-10-03-2".to_string(),
        };

        let json = serde_json::to_value(&pick).unwrap();
        assert_eq!(json["title"], "Cumplimiento ISO 27001");
        assert_eq!(json["news_priority"], 2);
        assert_eq!(json["rotation_id"], "2025-10-03-2");

        let back: DailyPick = serde_json::from_value(json).unwrap();
        assert_eq!(back, pick);
    }
}
