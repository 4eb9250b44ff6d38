use anyhow::Result;
use jiff::Zoned;
use serde_json::Value;

use crate::config::Config;
use crate::models::{Post, PostDraft, format_timestamp};
use crate::store::Store;

/// Validate and append one post. Falls back to the configured default author
/// and the current local time when those are not given.
pub fn add(
    text: String,
    author: Option<String>,
    timestamp: Option<String>,
    config: &Config,
    store: &mut Store,
) -> Result<Post> {
    let timestamp = timestamp.unwrap_or_else(|| format_timestamp(Zoned::now().datetime()));
    let author = author.or_else(|| config.post.default_author.clone());

    let draft = PostDraft {
        author: author.map(Value::String),
        ..PostDraft::new(text, timestamp, "")
    };

    store.append(&draft)
}

pub fn list(store: &Store) -> Vec<Post> {
    store.feed().to_vec()
}
