use thiserror::Error;

use crate::models::Field;

/// Why a single record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Post must contain text, timestamp, and author (missing {0})")]
    MissingField(Field),

    #[error("Post text must be a non-empty string")]
    InvalidText,

    #[error(
        "Post timestamp must be a valid date string in format YYYY-MM-DD HH:MM:SS (got {0:?})"
    )]
    InvalidTimestamp(String),

    #[error("Post author must be a non-empty string")]
    InvalidAuthor,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A batch was rejected because of the record at `index`.
    #[error("Invalid post at index {index}")]
    Record {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("Input must be an array of posts: {0}")]
    InvalidInput(String),
}

impl FeedError {
    /// The validation failure behind this error, if any.
    pub fn kind(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) | Self::Record { source: err, .. } => Some(err),
            Self::InvalidInput(_) => None,
        }
    }
}
