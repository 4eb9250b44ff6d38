use jiff::civil::DateTime;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

use super::timestamp::{self, format_timestamp};

/// The three fields every post must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Text,
    Timestamp,
    Author,
}

/// A validated post. Only [`PostDraft::validate`](super::PostDraft::validate)
/// hands these out, so every `Post` in a feed satisfies the field rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    text: String,
    #[serde(serialize_with = "timestamp::serialize")]
    timestamp: DateTime,
    author: String,
}

impl Post {
    pub(crate) fn new(text: String, timestamp: DateTime, author: String) -> Self {
        Self {
            text,
            timestamp,
            author,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime {
        self.timestamp
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// The timestamp in its `YYYY-MM-DD HH:MM:SS` form.
    pub fn timestamp_str(&self) -> String {
        format_timestamp(self.timestamp)
    }

    /// Case-insensitive substring test against the text only.
    /// `needle` must already be lowercased.
    pub(crate) fn text_contains_lowercase(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
    }
}
