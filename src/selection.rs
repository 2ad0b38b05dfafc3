//! Daily rotation: a random handful of processed articles.

use crate::models::{DailyPick, ProcessedArticle};
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

/// `YYYY-MM-DD-N` for the `priority`-th pick of `date`.
pub fn rotation_id(date: DateTime<Utc>, priority: usize) -> String {
    format!("{}-{priority}", date.format("%Y-%m-%d"))
}

/// Pick `count` distinct articles at random.
///
/// When fewer than `count` articles exist, all of them are returned (in
/// shuffled order) and a warning is logged.
pub fn select_daily<R>(
    articles: &[ProcessedArticle],
    count: usize,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<DailyPick>
where
    R: Rng + ?Sized,
{
    if articles.len() < count {
        warn!(
            available = articles.len(),
            requested = count,
            "Not enough articles for the daily rotation; taking all of them"
        );
    }

    let mut pool = articles.to_vec();
    pool.shuffle(rng);

    let picks: Vec<DailyPick> = pool
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, article)| DailyPick {
            article,
            news_priority: i + 1,
            selected_date: now,
            rotation_id: rotation_id(now, i + 1),
        })
        .collect();

    info!(
        selected = picks.len(),
        ids = ?picks.iter().map(|p| p.article.id).collect::<Vec<_>>(),
        "Daily articles selected"
    );
    picks
}
