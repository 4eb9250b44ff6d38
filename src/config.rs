//! Optional per-store settings read from `.linkfeed/config.toml`.
//!
//! Every key has a default, so a missing file or a partial file is fine.
//!
//! ```toml
//! [post]
//! default_author = "Alice"
//!
//! [output]
//! wrap_width = 72
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub post: PostConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[post]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostConfig {
    /// Used by `post add` when `--author` is not given.
    #[serde(default)]
    pub default_author: Option<String>,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_wrap_width() -> usize {
    80
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            wrap_width: default_wrap_width(),
        }
    }
}

impl Config {
    /// Reads `config.toml` from the store directory, falling back to defaults
    /// when the file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.output.wrap_width, 80);
        assert!(config.post.default_author.is_none());
    }

    #[rstest]
    #[case::full("[post]\ndefault_author = \"Alice\"\n[output]\nwrap_width = 40\n", Some("Alice"), 40)]
    #[case::post_only("[post]\ndefault_author = \"Bob\"\n", Some("Bob"), 80)]
    #[case::empty("", None, 80)]
    fn partial_files_fill_defaults(
        #[case] content: &str,
        #[case] author: Option<&str>,
        #[case] width: usize,
    ) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), content).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.post.default_author.as_deref(), author);
        assert_eq!(config.output.wrap_width, width);
    }

    #[rstest]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[output]\nwrap_width = \"wide\"\n").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
