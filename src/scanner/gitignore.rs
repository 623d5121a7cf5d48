//! Ignore-pattern matching consulted for every directory entry

use anyhow::{Context, Result};
use ignore::gitignore::Gitignore;
use std::path::Path;

/// Predicate deciding whether a relative path is excluded from the walk
pub trait PathMatcher: Send + Sync {
    fn is_ignored(&self, path: &str, is_dir: bool) -> bool;
}

impl PathMatcher for Gitignore {
    fn is_ignored(&self, path: &str, is_dir: bool) -> bool {
        self.matched(path, is_dir).is_ignore()
    }
}

/// Load `.gitignore` from the walk root
///
/// A missing file yields `None`. Unreadable files are an error; individual
/// invalid globs are logged and skipped.
pub fn load_gitignore(root: &Path) -> Result<Option<Gitignore>> {
    let path = root.join(".gitignore");
    if !path.is_file() {
        return Ok(None);
    }

    let (gitignore, err) = Gitignore::new(&path);
    if let Some(err) = err {
        if err.is_io() {
            return Err(err).with_context(|| format!("unable to read {}", path.display()));
        }
        tracing::warn!("{}: {}", path.display(), err);
    }

    tracing::debug!("loaded {} ignore patterns from {}", gitignore.num_ignores(), path.display());
    Ok(Some(gitignore))
}
