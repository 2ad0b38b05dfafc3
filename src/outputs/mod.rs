//! Published JSON documents.
//!
//! # Submodules
//!
//! - [`feed`]: Builds the main feed document with run statistics
//! - [`daily`]: Builds the daily rotation document
//! - [`json`]: Reads and writes the documents on disk
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── isotools-final-data.json   # every processed article
//! └── isotools-daily-news.json   # today's random selection
//! ```

pub mod daily;
pub mod feed;
pub mod json;

use crate::models::ProcessedArticle;
use itertools::Itertools;

pub(crate) const SOURCE_NAME: &str = "ISOTools Corporate Blog (isotools.us)";
pub(crate) const LANGUAGE: &str = "español";

/// Rounded mean of `summary_length`, 0 for an empty list.
pub(crate) fn avg_summary_length<'a, I>(articles: I) -> usize
where
    I: IntoIterator<Item = &'a ProcessedArticle>,
{
    let (count, total) = articles
        .into_iter()
        .fold((0usize, 0usize), |(n, sum), a| (n + 1, sum + a.summary_length));
    if count == 0 {
        0
    } else {
        (total as f64 / count as f64).round() as usize
    }
}

/// Distinct categories in first-seen order.
pub(crate) fn categories_in_order<'a, I>(articles: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ProcessedArticle>,
{
    articles
        .into_iter()
        .map(|a| a.category.clone())
        .unique()
        .collect()
}
