//! The daily rotation document.

use super::{LANGUAGE, SOURCE_NAME, avg_summary_length, categories_in_order};
use crate::models::{
    DailyConfiguration, DailyMetadata, DailyNewsDocument, DailyPick, DailyStatistics, DataSource,
};
use chrono::{DateTime, Duration, Utc};

const DAILY_TITLE: &str = "ISOTools - Noticias Diarias";
const DAILY_VERSION: &str = "1.0.0";
const ROTATION_TYPE: &str = "daily_random_selection";
const CACHE_DURATION_HOURS: u32 = 24;

/// Inputs describing where the picks came from.
#[derive(Debug, Clone)]
pub struct DailyRun<'a> {
    pub source: DataSource,
    /// File name of the feed the picks were drawn from.
    pub parent_source: &'a str,
    pub articles_per_day: usize,
    pub total_available: usize,
    pub selection_method: &'a str,
    pub generated_at: DateTime<Utc>,
}

pub fn build_daily(picks: Vec<DailyPick>, run: &DailyRun<'_>) -> DailyNewsDocument {
    let date = run.generated_at.format("%Y-%m-%d").to_string();
    let next = (run.generated_at + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let rotation_id = picks
        .first()
        .map(|p| p.rotation_id.clone())
        .unwrap_or_else(|| format!("{date}-0"));

    let statistics = DailyStatistics {
        total_selected: picks.len(),
        total_available_articles: run.total_available,
        categories_today: categories_in_order(picks.iter().map(|p| &p.article)),
        avg_summary_length: avg_summary_length(picks.iter().map(|p| &p.article)),
        selection_date: date.clone(),
        rotation_id,
    };

    DailyNewsDocument {
        metadata: DailyMetadata {
            title: DAILY_TITLE.to_string(),
            description: format!(
                "Selección diaria de {} artículos destacados sobre normas ISO",
                run.articles_per_day
            ),
            source: SOURCE_NAME.to_string(),
            generated_date: date,
            generated_at: run.generated_at,
            next_update: next,
            total_articles: picks.len(),
            rotation_type: ROTATION_TYPE.to_string(),
            version: DAILY_VERSION.to_string(),
            parent_source: run.parent_source.to_string(),
            language: LANGUAGE.to_string(),
            data_source: run.source,
        },
        configuration: DailyConfiguration {
            daily_rotation: true,
            articles_per_day: run.articles_per_day,
            selection_method: run.selection_method.to_string(),
            cache_duration_hours: CACHE_DURATION_HOURS,
        },
        daily_news: picks,
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessedArticle;
    use chrono::TimeZone;

    fn pick(id: usize, category: &str, len: usize) -> DailyPick {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 7, 0, 0).unwrap();
        DailyPick {
            article: ProcessedArticle {
                id,
                title: format!("Artículo {id}"),
                url: format!("https://www.isotools.us/a-{id}/"),
                image_url: None,
                post_code: None,
                ai_summary: "y".repeat(len),
                summary_length: len,
                category: category.to_string(),
                ai_generated: false,
                page_found: 2,
                extracted_at: at,
                processed_at: at,
                source: DataSource::Fallback,
            },
            news_priority: id,
            selected_date: at,
            rotation_id: format!("2025-12-31-{id}"),
        }
    }

    fn run() -> DailyRun<'static> {
        DailyRun {
            source: DataSource::Fallback,
            parent_source: "isotools-final-data.json",
            articles_per_day: 3,
            total_available: 30,
            selection_method: "seeded_shuffle",
            generated_at: Utc.with_ymd_and_hms(2025, 12, 31, 7, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_daily_document_fields() {
        let picks = vec![
            pick(1, "ISO_14001_Gestion_Ambiental", 100),
            pick(2, "ISO_14001_Gestion_Ambiental", 201),
            pick(3, "ISO_31000_Gestion_Riesgos", 300),
        ];
        let doc = build_daily(picks, &run());

        assert_eq!(doc.metadata.generated_date, "2025-12-31");
        assert_eq!(doc.metadata.next_update, "2026-01-01");
        assert_eq!(doc.metadata.total_articles, 3);
        assert_eq!(doc.metadata.data_source, DataSource::Fallback);
        assert!(doc.metadata.description.contains(" 3 artículos"));
        assert_eq!(doc.configuration.selection_method, "seeded_shuffle");
        assert_eq!(doc.statistics.total_available_articles, 30);
        assert_eq!(doc.statistics.avg_summary_length, 200);
        assert_eq!(
            doc.statistics.categories_today,
            vec!["ISO_14001_Gestion_Ambiental", "ISO_31000_Gestion_Riesgos"]
        );
        assert_eq!(doc.statistics.rotation_id, "2025-12-31-1");
    }

    #[test]
    fn test_empty_selection() {
        let doc = build_daily(Vec::new(), &run());
        assert_eq!(doc.statistics.total_selected, 0);
        assert_eq!(doc.statistics.avg_summary_length, 0);
        assert_eq!(doc.statistics.rotation_id, "2025-12-31-0");
    }
}
