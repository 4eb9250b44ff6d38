use serde::Serialize;

use crate::feed::search_feed;
use crate::helpers::{feed_words, find_similar_word};
use crate::models::Post;
use crate::store::Store;

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub keyword: Option<String>,
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Search the stored feed. When nothing matches, suggest the closest word
/// that does appear in the feed.
pub fn run(keyword: Option<String>, store: &Store) -> SearchResult {
    let feed = store.feed();
    let posts: Vec<Post> = search_feed(feed, keyword.as_deref())
        .into_iter()
        .cloned()
        .collect();

    let suggestion = match keyword.as_deref() {
        Some(keyword) if posts.is_empty() && !keyword.is_empty() => {
            let words = feed_words(feed);
            let candidates: Vec<&str> = words.iter().map(String::as_str).collect();
            find_similar_word(&keyword.to_lowercase(), &candidates).map(str::to_owned)
        }
        _ => None,
    };

    SearchResult {
        keyword,
        posts,
        suggestion,
    }
}
