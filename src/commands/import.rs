use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::feed::Feed;
use crate::store::Store;

#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub total: usize,
    pub replaced: bool,
}

/// Build a batch from a JSON array of posts and store it. Nothing is written
/// unless every record in the file is valid.
pub fn run(file: &Path, replace: bool, store: &mut Store) -> Result<ImportResult> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as JSON", file.display()))?;

    let batch = Feed::from_json(&value)
        .with_context(|| format!("Rejected {}; nothing was imported", file.display()))?;
    let imported = batch.len();

    store.import(batch, replace)?;

    Ok(ImportResult {
        imported,
        total: store.feed().len(),
        replaced: replace,
    })
}
