use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::LINKFEED_DIR;
use crate::store::Store;

/// What `init` ended up doing, for the caller to report.
#[derive(Debug, PartialEq)]
pub enum InitOutcome {
    Created {
        path: PathBuf,
        excluded_in: Option<&'static str>,
    },
    AlreadyInitialized(PathBuf),
}

pub fn run(stealth: bool) -> Result<InitOutcome> {
    run_in(Path::new("."), stealth)
}

/// Creates `.linkfeed/` under `root` with an empty feed file.
pub fn run_in(root: &Path, stealth: bool) -> Result<InitOutcome> {
    let store_dir = root.join(LINKFEED_DIR);

    if store_dir.exists() {
        return Ok(InitOutcome::AlreadyInitialized(PathBuf::from(LINKFEED_DIR)));
    }

    fs::create_dir_all(&store_dir).context("Failed to create .linkfeed directory")?;

    let store = Store::open(&store_dir)?;
    store.init_schema()?;

    let excluded_in = if stealth {
        add_to_gitignore(root)?
    } else {
        None
    };

    Ok(InitOutcome::Created {
        path: PathBuf::from(LINKFEED_DIR),
        excluded_in,
    })
}

/// Adds `.linkfeed` to git exclusions and returns the file it went into.
/// Prefers `.git/info/exclude` if it exists (truly local), otherwise uses `.gitignore`.
fn add_to_gitignore(root: &Path) -> Result<Option<&'static str>> {
    const EXCLUDE: &str = ".git/info/exclude";
    const GITIGNORE: &str = ".gitignore";

    let exclude_path = root.join(EXCLUDE);
    let gitignore_path = root.join(GITIGNORE);

    let (target_path, label) = if exclude_path.exists() {
        (exclude_path, EXCLUDE)
    } else if gitignore_path.exists() || root.join(".git").is_dir() {
        (gitignore_path, GITIGNORE)
    } else {
        // Not a git repo
        return Ok(None);
    };

    let content = fs::read_to_string(&target_path).unwrap_or_default();
    if content
        .lines()
        .any(|line| line.trim() == LINKFEED_DIR || line.trim() == ".linkfeed/")
    {
        return Ok(Some(label));
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&target_path)
        .context("Failed to open git exclusion file")?;

    if !content.is_empty() && !content.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "{LINKFEED_DIR}")?;

    Ok(Some(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FEED_FILE;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn creates_store_once() {
        let dir = TempDir::new().unwrap();

        let first = run_in(dir.path(), false).unwrap();
        assert!(matches!(first, InitOutcome::Created { excluded_in: None, .. }));
        assert!(dir.path().join(LINKFEED_DIR).join(FEED_FILE).exists());

        let second = run_in(dir.path(), false).unwrap();
        assert!(matches!(second, InitOutcome::AlreadyInitialized(_)));
    }

    #[rstest]
    fn stealth_outside_git_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let outcome = run_in(dir.path(), true).unwrap();
        assert!(matches!(outcome, InitOutcome::Created { excluded_in: None, .. }));
        assert!(!dir.path().join(".gitignore").exists());
    }

    #[rstest]
    fn stealth_prefers_git_info_exclude() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git/info")).unwrap();
        fs::write(dir.path().join(".git/info/exclude"), "# local\n*.log").unwrap();

        let outcome = run_in(dir.path(), true).unwrap();
        assert!(matches!(
            outcome,
            InitOutcome::Created { excluded_in: Some(".git/info/exclude"), .. }
        ));
        let content = fs::read_to_string(dir.path().join(".git/info/exclude")).unwrap();
        assert_eq!(content, "# local\n*.log\n.linkfeed\n");
    }

    #[rstest]
    fn stealth_uses_gitignore_in_plain_repo() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), ".linkfeed/\n").unwrap();

        run_in(dir.path(), true).unwrap();
        let content = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(content, ".linkfeed/\n");
    }
}
