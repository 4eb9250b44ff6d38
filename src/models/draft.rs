use serde_json::Value;
use strum::IntoEnumIterator;

use super::{Field, Post, parse_timestamp};
use crate::error::ValidationError;

/// An unvalidated candidate record.
///
/// Fields are loosely typed so that input read from JSON can be absent,
/// `null`, or of the wrong type; [`PostDraft::validate`] sorts out which.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub text: Option<Value>,
    pub timestamp: Option<Value>,
    pub author: Option<Value>,
}

impl PostDraft {
    pub fn new(
        text: impl Into<String>,
        timestamp: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            text: Some(Value::String(text.into())),
            timestamp: Some(Value::String(timestamp.into())),
            author: Some(Value::String(author.into())),
        }
    }

    /// Reads a draft out of one element of a JSON batch. Anything that is not
    /// an object yields a draft with every field absent.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                text: map.get("text").cloned(),
                timestamp: map.get("timestamp").cloned(),
                author: map.get("author").cloned(),
            },
            _ => Self::default(),
        }
    }

    fn field(&self, field: Field) -> Option<&Value> {
        match field {
            Field::Text => self.text.as_ref(),
            Field::Timestamp => self.timestamp.as_ref(),
            Field::Author => self.author.as_ref(),
        }
    }

    /// Checks the draft and turns it into a [`Post`].
    ///
    /// Presence of all three fields is checked first, then text, timestamp,
    /// and author in that order. Text and author are stored as given, not
    /// trimmed.
    pub fn validate(&self) -> Result<Post, ValidationError> {
        if let Some(missing) = Field::iter().find(|&f| is_missing(self.field(f))) {
            return Err(ValidationError::MissingField(missing));
        }

        let text = non_blank(self.text.as_ref()).ok_or(ValidationError::InvalidText)?;

        let timestamp = match self.timestamp.as_ref() {
            Some(Value::String(raw)) => parse_timestamp(raw)?,
            other => {
                let shown = other.map(Value::to_string).unwrap_or_default();
                return Err(ValidationError::InvalidTimestamp(shown));
            }
        };

        let author = non_blank(self.author.as_ref()).ok_or(ValidationError::InvalidAuthor)?;

        Ok(Post::new(text.to_owned(), timestamp, author.to_owned()))
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self::new(post.text(), post.timestamp_str(), post.author())
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn base() -> PostDraft {
        PostDraft::new("Hello World", "2024-01-01 10:00:00", "Alice")
    }

    #[fixture]
    fn valid() -> PostDraft {
        base()
    }

    #[rstest]
    fn valid_draft_becomes_post(valid: PostDraft) {
        let post = valid.validate().unwrap();
        assert_eq!(post.text(), "Hello World");
        assert_eq!(post.author(), "Alice");
        assert_eq!(post.timestamp_str(), "2024-01-01 10:00:00");
    }

    // Surrounding whitespace is only used for the emptiness check.
    #[rstest]
    fn text_and_author_kept_untrimmed() {
        let post = PostDraft::new("  padded  ", "2024-01-01 10:00:00", " Bob ")
            .validate()
            .unwrap();
        assert_eq!(post.text(), "  padded  ");
        assert_eq!(post.author(), " Bob ");
    }

    #[rstest]
    #[case::no_text(PostDraft { text: None, ..base() }, Field::Text)]
    #[case::null_text(PostDraft { text: Some(Value::Null), ..base() }, Field::Text)]
    #[case::empty_text(PostDraft { text: Some(json!("")), ..base() }, Field::Text)]
    #[case::no_timestamp(PostDraft { timestamp: None, ..base() }, Field::Timestamp)]
    #[case::empty_author(PostDraft { author: Some(json!("")), ..base() }, Field::Author)]
    fn missing_fields(#[case] draft: PostDraft, #[case] field: Field) {
        assert_eq!(draft.validate(), Err(ValidationError::MissingField(field)));
    }

    // Presence is checked for every field before any value check runs.
    #[rstest]
    fn presence_checked_before_values() {
        let draft = PostDraft {
            text: Some(json!("   ")),
            timestamp: Some(json!("nope")),
            author: None,
        };
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField(Field::Author))
        );
    }

    #[rstest]
    #[case::blank_text(PostDraft { text: Some(json!(" \t\n")), ..base() })]
    #[case::numeric_text(PostDraft { text: Some(json!(42)), ..base() })]
    #[case::array_text(PostDraft { text: Some(json!(["a"])), ..base() })]
    fn invalid_text(#[case] draft: PostDraft) {
        assert_eq!(draft.validate(), Err(ValidationError::InvalidText));
    }

    #[rstest]
    #[case::calendar(PostDraft { timestamp: Some(json!("2024-02-30 10:00:00")), ..base() })]
    #[case::shape(PostDraft { timestamp: Some(json!("yesterday")), ..base() })]
    #[case::number(PostDraft { timestamp: Some(json!(1_704_103_200)), ..base() })]
    fn invalid_timestamp(#[case] draft: PostDraft) {
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidTimestamp(_))
        ));
    }

    #[rstest]
    #[case::blank(PostDraft { author: Some(json!("  ")), ..base() })]
    #[case::boolean(PostDraft { author: Some(json!(true)), ..base() })]
    fn invalid_author(#[case] draft: PostDraft) {
        assert_eq!(draft.validate(), Err(ValidationError::InvalidAuthor));
    }

    #[rstest]
    fn from_json_reads_object_fields() {
        let draft = PostDraft::from_json(&json!({
            "text": "Hi",
            "timestamp": "2024-01-01 10:00:00",
            "author": "Alice",
            "likes": 3
        }));
        assert_eq!(
            draft,
            PostDraft::new("Hi", "2024-01-01 10:00:00", "Alice")
        );
    }

    #[rstest]
    fn from_json_non_object_is_all_missing() {
        let draft = PostDraft::from_json(&json!("just a string"));
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingField(Field::Text))
        );
    }

    #[rstest]
    fn post_serializes_with_original_timestamp_shape(valid: PostDraft) {
        let post = valid.validate().unwrap();
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "Hello World",
                "timestamp": "2024-01-01 10:00:00",
                "author": "Alice"
            })
        );
    }
}
