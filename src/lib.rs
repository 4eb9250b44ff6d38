#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod feed;
pub mod helpers;
pub mod models;
pub mod output;
pub mod store;

use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

use cli::{Cli, Commands, PostCommands};
use config::Config;
use output::Output;
use store::Store;

pub use error::{FeedError, ValidationError};
pub use feed::{Feed, Node, append_post, build_feed, search_feed};
pub use models::{Field, Post, PostDraft};

pub const LINKFEED_DIR: &str = ".linkfeed";
pub const REDIRECT_FILE: &str = "redirect";

/// Finds the `.linkfeed/` directory by walking up from the current directory.
/// Returns `None` if no `.linkfeed/` directory is found.
pub fn find_linkfeed_dir() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    let mut dir = current_dir.as_path();

    loop {
        let store_path = dir.join(LINKFEED_DIR);
        if store_path.is_dir() {
            return Some(store_path);
        }

        dir = dir.parent()?;
    }
}

/// Resolves the final store directory, following any redirect file.
/// A redirect file contains a path (absolute or relative) to another `.linkfeed/` directory.
pub fn resolve_linkfeed_dir() -> Option<PathBuf> {
    let store_dir = find_linkfeed_dir()?;
    let redirect_path = store_dir.join(REDIRECT_FILE);

    if redirect_path.is_file() {
        let target = std::fs::read_to_string(&redirect_path).ok()?;
        let target = target.trim();

        let target_path = if PathBuf::from(target).is_absolute() {
            PathBuf::from(target)
        } else {
            store_dir.parent()?.join(target)
        };

        if target_path.is_dir() {
            return Some(target_path);
        }
    }

    Some(store_dir)
}

fn ensure_initialized() -> Result<(Store, Config)> {
    let store_dir = resolve_linkfeed_dir()
        .ok_or_else(|| anyhow!("Feed not initialized. Run 'linkfeed init' first."))?;

    let store = Store::open(&store_dir).context("Failed to open feed store")?;
    let config = Config::load(&store_dir)?;
    Ok((store, config))
}

fn run_post(post_cmd: PostCommands, store: &mut Store, config: &Config) -> Result<()> {
    match post_cmd {
        PostCommands::Add {
            text,
            author,
            timestamp,
            json,
        } => {
            let post = commands::post::add(text, author, timestamp, config, store)?;
            Output::new(json, config).post_added(&post)
        }
        PostCommands::List { json } => {
            let posts = commands::post::list(store);
            Output::new(json, config).post_list(&posts)
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { stealth } => {
            let outcome = commands::init::run(stealth)?;
            Output::new(false, &Config::default()).init(&outcome)
        }
        Commands::Post(post_cmd) => {
            let (mut store, config) = ensure_initialized()?;
            run_post(post_cmd, &mut store, &config)
        }
        Commands::Import {
            file,
            replace,
            json,
        } => {
            let (mut store, config) = ensure_initialized()?;
            let result = commands::import::run(&file, replace, &mut store)?;
            Output::new(json, &config).imported(&result)
        }
        Commands::Search { keyword, json } => {
            let (store, config) = ensure_initialized()?;
            let result = commands::search::run(keyword, &store);
            Output::new(json, &config).search_results(&result)
        }
        Commands::Status { json } => {
            let (store, config) = ensure_initialized()?;
            let status = commands::status::run(&store);
            Output::new(json, &config).status(&status)
        }
    }
}
