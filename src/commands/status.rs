use std::collections::BTreeSet;

use serde::Serialize;

use crate::store::Store;

#[derive(Debug, Serialize)]
pub struct FeedStatus {
    pub posts: usize,
    pub authors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
}

pub fn run(store: &Store) -> FeedStatus {
    let feed = store.feed();
    let authors: BTreeSet<&str> = feed.iter().map(|p| p.author()).collect();

    FeedStatus {
        posts: feed.len(),
        authors: authors.len(),
        earliest: feed.iter().min_by_key(|p| p.timestamp()).map(|p| p.timestamp_str()),
        latest: feed.iter().max_by_key(|p| p.timestamp()).map(|p| p.timestamp_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostDraft;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn empty_store_has_no_range() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let status = run(&store);
        assert_eq!(status.posts, 0);
        assert_eq!(status.authors, 0);
        assert!(status.earliest.is_none());
        assert!(status.latest.is_none());
    }

    // Feed order is insertion order, not time order; the range must still be
    // computed from the timestamps.
    #[rstest]
    fn summarizes_posts_out_of_time_order() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::open(dir.path()).unwrap();
        for (ts, author) in [
            ("2024-03-01 12:00:00", "Alice"),
            ("2023-12-31 23:59:59", "Bob"),
            ("2024-06-15 08:30:00", "Alice"),
        ] {
            store.append(&PostDraft::new("post", ts, author)).unwrap();
        }

        let status = run(&store);
        assert_eq!(status.posts, 3);
        assert_eq!(status.authors, 2);
        assert_eq!(status.earliest.as_deref(), Some("2023-12-31 23:59:59"));
        assert_eq!(status.latest.as_deref(), Some("2024-06-15 08:30:00"));
    }
}
