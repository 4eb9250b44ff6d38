use anyhow::Result;
use console::{Term, style};
use serde::Serialize;

use crate::commands::import::ImportResult;
use crate::commands::init::InitOutcome;
use crate::commands::search::SearchResult;
use crate::commands::status::FeedStatus;
use crate::config::Config;
use crate::models::Post;

pub struct Output {
    term: Term,
    json: bool,
    wrap_width: usize,
}

impl Output {
    pub fn new(json: bool, config: &Config) -> Self {
        Self {
            term: Term::stdout(),
            json,
            wrap_width: config.output.wrap_width,
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let output = serde_json::to_string_pretty(value)?;
        self.term.write_line(&output)?;
        Ok(())
    }

    fn print_post(&self, post: &Post) -> Result<()> {
        self.term.write_line(&format!(
            "{} {}",
            style(post.author()).cyan().bold(),
            style(post.timestamp_str()).dim()
        ))?;

        let options = textwrap::Options::new(self.wrap_width.max(8))
            .initial_indent("  ")
            .subsequent_indent("  ");
        self.term
            .write_line(&textwrap::fill(post.text(), &options))?;
        Ok(())
    }

    pub fn init(&self, outcome: &InitOutcome) -> Result<()> {
        match outcome {
            InitOutcome::AlreadyInitialized(path) => {
                self.term.write_line(&format!(
                    "Feed already initialized in {}",
                    path.display()
                ))?;
            }
            InitOutcome::Created { path, excluded_in } => {
                if let Some(file) = excluded_in {
                    self.term.write_line(&format!("Added .linkfeed to {file}"))?;
                }
                self.term
                    .write_line(&format!("Initialized feed in {}", path.display()))?;
            }
        }
        Ok(())
    }

    pub fn post_added(&self, post: &Post) -> Result<()> {
        if self.json {
            return self.print_json(post);
        }

        self.term
            .write_line(&style("Added post:").green().to_string())?;
        self.print_post(post)
    }

    pub fn post_list(&self, posts: &[Post]) -> Result<()> {
        if self.json {
            return self.print_json(posts);
        }

        if posts.is_empty() {
            self.term.write_line("No posts found.")?;
            return Ok(());
        }

        for post in posts {
            self.print_post(post)?;
            self.term.write_line("")?;
        }
        Ok(())
    }

    pub fn imported(&self, result: &ImportResult) -> Result<()> {
        if self.json {
            return self.print_json(result);
        }

        let verb = if result.replaced {
            "Replaced feed with"
        } else {
            "Imported"
        };
        self.term.write_line(&format!(
            "{} {} post(s)",
            style(verb).green(),
            style(result.imported).bold()
        ))?;
        self.term
            .write_line(&format!("  Feed size: {}", result.total))?;
        Ok(())
    }

    pub fn search_results(&self, result: &SearchResult) -> Result<()> {
        if self.json {
            return self.print_json(result);
        }

        if result.posts.is_empty() {
            match result.keyword.as_deref() {
                Some(keyword) if !keyword.is_empty() => {
                    self.term
                        .write_line(&format!("No posts match '{keyword}'."))?;
                }
                _ => self.term.write_line("No keyword given.")?,
            }
            if let Some(suggestion) = &result.suggestion {
                self.term.write_line(&format!(
                    "Did you mean: {}",
                    style(suggestion).yellow()
                ))?;
            }
            return Ok(());
        }

        self.term.write_line(&format!(
            "{} matching post(s):",
            style(result.posts.len()).green().bold()
        ))?;
        self.term.write_line("")?;

        for post in &result.posts {
            self.print_post(post)?;
            self.term.write_line("")?;
        }
        Ok(())
    }

    pub fn status(&self, status: &FeedStatus) -> Result<()> {
        if self.json {
            return self.print_json(status);
        }

        self.term
            .write_line(&style("Feed:").bold().to_string())?;
        self.term
            .write_line(&format!("  Posts: {}", status.posts))?;
        self.term
            .write_line(&format!("  Authors: {}", status.authors))?;
        if let (Some(earliest), Some(latest)) = (&status.earliest, &status.latest) {
            self.term
                .write_line(&format!("  Earliest: {earliest}"))?;
            self.term.write_line(&format!("  Latest: {latest}"))?;
        }
        Ok(())
    }
}
