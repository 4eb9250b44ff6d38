use std::collections::BTreeSet;

use strsim::levenshtein;

use crate::feed::Feed;

/// Find the most similar word from a list of candidates
pub fn find_similar_word<'a>(target: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&candidate| (candidate, levenshtein(target, candidate)))
        .filter(|(_, distance)| *distance > 0 && *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(word, _)| word)
}

/// Distinct lowercase words appearing in post texts, in sorted order.
pub fn feed_words(feed: &Feed) -> BTreeSet<String> {
    feed.iter()
        .flat_map(|post| post.text().split(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::build_feed;
    use crate::models::PostDraft;

    #[test]
    fn test_find_similar_word() {
        let candidates = vec!["hello", "world", "rust"];

        assert_eq!(find_similar_word("helo", &candidates), Some("hello"));

        assert_eq!(find_similar_word("wrld", &candidates), Some("world"));

        // An exact match is not a suggestion
        assert_eq!(find_similar_word("rust", &candidates), None);

        // Very different word should return None
        assert_eq!(find_similar_word("zzzzzzz", &candidates), None);
    }

    #[test]
    fn test_feed_words() {
        let feed = build_feed([
            PostDraft::new("Hello, World!", "2024-01-01 10:00:00", "a"),
            PostDraft::new("hello again", "2024-01-01 10:00:01", "b"),
        ])
        .unwrap();

        let words: Vec<String> = feed_words(&feed).into_iter().collect();
        assert_eq!(words, ["again", "hello", "world"]);
    }
}
