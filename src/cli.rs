use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "linkfeed")]
#[command(about = "Append-only feed of validated posts with keyword search", long_about = None)]
pub struct Cli {
    /// Log debug events to stderr (filter with RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a feed in the current project
    Init {
        /// Initialize without committing to the repo (adds .linkfeed to .gitignore or .git/info/exclude)
        #[arg(long)]
        stealth: bool,
    },

    /// Add or list posts
    #[command(subcommand)]
    Post(PostCommands),

    /// Import a JSON array of posts; nothing is stored unless every post is valid
    Import {
        /// Path to a JSON file containing an array of {text, timestamp, author} objects
        file: PathBuf,

        /// Replace the whole feed instead of appending
        #[arg(long)]
        replace: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search post text for a keyword (case-insensitive)
    Search {
        /// The keyword to look for
        keyword: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a summary of the feed
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// Append a post to the end of the feed
    Add {
        /// The post text
        text: String,

        /// Post author (defaults to post.default_author from config.toml)
        #[arg(long)]
        author: Option<String>,

        /// Timestamp as "YYYY-MM-DD HH:MM:SS" (defaults to now)
        #[arg(long)]
        timestamp: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all posts in feed order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
