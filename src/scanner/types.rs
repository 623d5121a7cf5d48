use std::cell::OnceCell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::SystemTime;

/// Parent value that stands for the scan root itself
///
/// It is never emitted as a path component: children of the root are
/// reported by their bare names.
pub const ROOT: &str = ".";

/// A regular file discovered by the scanner
///
/// Paths are relative to the scan root and always use `/` as separator.
/// Records are produced by scanner workers and afterwards owned by the
/// ranking pipeline, which mutates `score` in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub binary: bool,
    pub score: i64,
    pub modified: SystemTime,
    depth: OnceCell<usize>,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            binary: false,
            score: 0,
            modified,
            depth: OnceCell::new(),
        }
    }

    /// Number of path segments, computed on first access and cached
    pub fn depth(&self) -> usize {
        *self
            .depth
            .get_or_init(|| self.path.matches('/').count() + 1)
    }
}

/// Configuration for the directory walk
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Directory the walk starts from; reported paths are relative to it
    pub root: PathBuf,
    /// Directory base names that are never descended into
    pub ignore_dirs: HashSet<String>,
    /// Consult `.gitignore` at the root before recording or descending
    pub use_gitignore: bool,
    /// Sniff file content to fill [`FileRecord::binary`]
    pub detect_binary: bool,
    /// Upper bound on concurrently running directory scans (0 = inline walk)
    pub max_concurrency: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from(ROOT),
            ignore_dirs: HashSet::new(),
            use_gitignore: false,
            detect_binary: false,
            max_concurrency: num_cpus::get(),
        }
    }
}
