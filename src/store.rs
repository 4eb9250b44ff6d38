use std::fs::{self, File};
use std::io::Write;
use std::iter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fs2::FileExt;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FeedError;
use crate::feed::Feed;
use crate::models::{Post, PostDraft};

pub const FEED_FILE: &str = "feed.toml";

/// Atomically write content to a file using a temporary file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let temp = path.with_extension("toml.tmp");
    let mut file = File::create(&temp)
        .with_context(|| format!("Failed to create temporary file: {}", temp.display()))?;
    file.lock_exclusive()
        .context("Failed to acquire file lock")?;
    file.write_all(content)
        .context("Failed to write file content")?;
    file.sync_all().context("Failed to sync file")?;
    file.unlock().context("Failed to unlock file")?;
    fs::rename(&temp, path).with_context(|| format!("Failed to rename to {}", path.display()))?;
    Ok(())
}

/// On-disk shape of `feed.toml` when writing.
#[derive(Serialize)]
struct FeedFileOut<'a> {
    updated_at: Timestamp,
    posts: Vec<&'a Post>,
}

/// On-disk shape of `feed.toml` when reading. Field values are left untyped
/// so that a hand-edited file with an absent or wrongly-typed field is
/// reported by the validator rather than by the parser.
#[derive(Deserialize)]
struct FeedFileIn {
    #[serde(default)]
    posts: Vec<StoredPost>,
}

#[derive(Deserialize)]
struct StoredPost {
    text: Option<toml::Value>,
    timestamp: Option<toml::Value>,
    author: Option<toml::Value>,
}

impl TryFrom<StoredPost> for PostDraft {
    type Error = serde_json::Error;

    fn try_from(stored: StoredPost) -> Result<Self, Self::Error> {
        Ok(Self {
            text: stored.text.map(serde_json::to_value).transpose()?,
            timestamp: stored.timestamp.map(serde_json::to_value).transpose()?,
            author: stored.author.map(serde_json::to_value).transpose()?,
        })
    }
}

/// A feed persisted in a `.linkfeed/` directory.
pub struct Store {
    path: PathBuf,
    feed: Feed,
}

impl Store {
    /// Open an existing store from the given directory. A directory without a
    /// feed file opens as an empty feed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            bail!("Store directory does not exist: {}", path.display());
        }

        let mut store = Self {
            path,
            feed: Feed::new(),
        };

        store.load()?;
        Ok(store)
    }

    /// Write an empty feed file. The directory must already exist.
    pub fn init_schema(&self) -> Result<()> {
        if self.feed_path().exists() {
            return Ok(());
        }
        self.save()
    }

    /// The base path for the `.linkfeed/` directory.
    pub fn base_path(&self) -> &Path {
        &self.path
    }

    pub fn feed_path(&self) -> PathBuf {
        self.path.join(FEED_FILE)
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Load `feed.toml`, re-validating every stored post.
    fn load(&mut self) -> Result<()> {
        let feed_path = self.feed_path();
        if !feed_path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&feed_path)
            .with_context(|| format!("Failed to read {}", feed_path.display()))?;
        let file: FeedFileIn = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", feed_path.display()))?;

        let drafts = file
            .posts
            .into_iter()
            .map(PostDraft::try_from)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read posts from {}", feed_path.display()))?;
        self.feed = Feed::build(drafts)
            .with_context(|| format!("Invalid post stored in {}", feed_path.display()))?;

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.write_posts(self.feed.iter())
    }

    /// Write `posts` as the whole feed file. The in-memory feed is not
    /// touched, so callers write first and link after a successful write.
    fn write_posts<'a>(&self, posts: impl Iterator<Item = &'a Post>) -> Result<()> {
        let file = FeedFileOut {
            updated_at: Timestamp::now(),
            posts: posts.collect(),
        };
        let count = file.posts.len();
        let content = toml::to_string(&file).context("Failed to serialize feed")?;
        atomic_write(&self.feed_path(), content.as_bytes())?;

        info!(posts = count, path = %self.feed_path().display(), "saved feed");
        Ok(())
    }

    /// Validate and persist one post, then link it into the feed. If the write
    /// fails the feed is left as it was.
    pub fn append(&mut self, draft: &PostDraft) -> Result<Post> {
        let post = draft.validate().map_err(FeedError::from)?;
        self.write_posts(self.feed.iter().chain(iter::once(&post)))?;
        Ok(self.feed.push(post).clone())
    }

    /// Persist an already-built batch, either after the existing posts or in
    /// place of them. The in-memory feed only changes once the write succeeds.
    pub fn import(&mut self, batch: Feed, replace: bool) -> Result<()> {
        if replace {
            self.write_posts(batch.iter())?;
            self.feed = batch;
        } else {
            self.write_posts(self.feed.iter().chain(batch.iter()))?;
            self.feed.extend_from(batch);
        }
        Ok(())
    }
}
