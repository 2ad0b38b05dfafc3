//! JSON file output.
//!
//! Documents are written pretty-printed with non-ASCII characters kept as is,
//! so the Spanish titles and summaries stay readable in the raw files.

use crate::models::FinalDocument;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `document` to `path`, replacing any previous file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_document<T>(document: &T, path: &Path) -> Result<(), Box<dyn Error>>
where
    T: Serialize,
{
    let json = serde_json::to_string_pretty(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, json.as_bytes()).await?;
    info!(bytes = json.len(), "Wrote JSON file");
    Ok(())
}

/// Read a previously written feed document.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_feed(path: &Path) -> Result<FinalDocument, Box<dyn Error>> {
    let text = fs::read_to_string(path).await?;
    let document: FinalDocument = serde_json::from_str(&text)?;
    info!(articles = document.data.len(), "Loaded feed");
    Ok(document)
}
