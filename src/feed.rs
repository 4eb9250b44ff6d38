//! The feed itself: an append-only, singly-linked list of validated posts.
//!
//! Nodes own their successor through `Option<Box<Node>>`; the feed holds the
//! head link and a running length. Posts never leave the feed once linked.

use std::borrow::Borrow;
use std::iter::FusedIterator;

use serde_json::Value;
use tracing::debug;

use crate::error::FeedError;
use crate::models::{Post, PostDraft};

#[derive(Debug)]
pub struct Node {
    post: Post,
    next: Option<Box<Node>>,
}

impl Node {
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// The following node, or `None` at the tail.
    pub fn next(&self) -> Option<&Node> {
        self.next.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct Feed {
    head: Option<Box<Node>>,
    len: usize,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a feed from a batch of drafts, keeping input order.
    ///
    /// Every draft is validated before the first node is linked. If any is
    /// rejected, no feed is produced and the error carries the index of the
    /// first bad record.
    pub fn build<I>(records: I) -> Result<Self, FeedError>
    where
        I: IntoIterator,
        I::Item: Borrow<PostDraft>,
    {
        let posts = records
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft
                    .borrow()
                    .validate()
                    .map_err(|source| FeedError::Record { index, source })
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| debug!(%err, "rejected batch"))?;

        debug!(len = posts.len(), "built feed");
        Ok(Self::from_posts(posts))
    }

    /// Builds a feed from a JSON array of post objects.
    pub fn from_json(value: &Value) -> Result<Self, FeedError> {
        let Value::Array(records) = value else {
            return Err(FeedError::InvalidInput(json_kind(value).to_owned()));
        };
        Self::build(records.iter().map(PostDraft::from_json))
    }

    fn from_posts(posts: Vec<Post>) -> Self {
        let len = posts.len();
        let mut head = None;
        for post in posts.into_iter().rev() {
            head = Some(Box::new(Node { post, next: head }));
        }
        Self { head, len }
    }

    /// Validates `draft` and links it after the current tail.
    /// A rejected draft leaves the feed untouched.
    pub fn append(&mut self, draft: &PostDraft) -> Result<&Post, FeedError> {
        let post = draft.validate()?;
        debug!(len = self.len + 1, "appending post");
        Ok(self.push(post))
    }

    pub(crate) fn push(&mut self, post: Post) -> &Post {
        self.len += 1;
        let node = self.tail_link().insert(Box::new(Node { post, next: None }));
        &node.post
    }

    /// Links all of `other` after the current tail.
    pub fn extend_from(&mut self, mut other: Feed) {
        let Some(head) = other.head.take() else {
            return;
        };
        self.len += other.len;
        *self.tail_link() = Some(head);
    }

    /// The empty link after the last node.
    fn tail_link(&mut self) -> &mut Option<Box<Node>> {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        link
    }

    /// Posts whose text contains `keyword`, ignoring case, in feed order.
    /// An empty keyword matches nothing.
    pub fn search(&self, keyword: &str) -> Vec<&Post> {
        if keyword.is_empty() || self.is_empty() {
            return Vec::new();
        }

        let needle = keyword.to_lowercase();
        let matches: Vec<&Post> = self
            .iter()
            .filter(|post| post.text_contains_lowercase(&needle))
            .collect();

        debug!(keyword, matches = matches.len(), "searched feed");
        matches
    }

    /// Like [`Feed::search`], but any non-string keyword matches nothing.
    pub fn search_json(&self, keyword: &Value) -> Vec<&Post> {
        keyword
            .as_str()
            .map(|keyword| self.search(keyword))
            .unwrap_or_default()
    }

    pub fn head(&self) -> Option<&Node> {
        self.head.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head(),
            remaining: self.len,
        }
    }

    pub fn to_vec(&self) -> Vec<Post> {
        self.iter().cloned().collect()
    }
}

// Unlink iteratively; the default recursive drop of Box<Node> can overflow
// the stack on long feeds.
impl Drop for Feed {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Post;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next();
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.post)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Feed {
    type Item = &'a Post;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds a feed from a batch of drafts. See [`Feed::build`].
pub fn build_feed<I>(records: I) -> Result<Feed, FeedError>
where
    I: IntoIterator,
    I::Item: Borrow<PostDraft>,
{
    Feed::build(records)
}

/// Appends one draft to `feed`. See [`Feed::append`].
pub fn append_post<'a>(feed: &'a mut Feed, draft: &PostDraft) -> Result<&'a Post, FeedError> {
    feed.append(draft)
}

/// Searches `feed` for `keyword`; a missing keyword matches nothing.
pub fn search_feed<'a>(feed: &'a Feed, keyword: Option<&str>) -> Vec<&'a Post> {
    keyword.map(|keyword| feed.search(keyword)).unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "got null",
        Value::Bool(_) => "got a boolean",
        Value::Number(_) => "got a number",
        Value::String(_) => "got a string",
        Value::Array(_) => "got an array",
        Value::Object(_) => "got an object",
    }
}
