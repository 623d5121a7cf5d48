use anyhow::Result;
use crossbeam::channel::{Sender, unbounded};
use std::collections::HashSet;
use std::path::PathBuf;

use super::binary::sniff_binary;
use super::directory::{child_path, read_entries};
use super::gitignore::{PathMatcher, load_gitignore};
use super::types::{FileRecord, ROOT, WalkOptions};
use crate::parallel::{DirectoryVisitor, Scheduler};

/// Per-directory scanner
///
/// Produces a [`FileRecord`] for every regular file in a directory and hands
/// subdirectories back to the scheduler. Records are sent to a single
/// collector channel; nothing else is shared between workers.
pub struct Scanner {
    root: PathBuf,
    ignore_dirs: HashSet<String>,
    matcher: Option<Box<dyn PathMatcher>>,
    detect_binary: bool,
    results: Sender<FileRecord>,
}

impl Scanner {
    pub fn new(
        root: PathBuf,
        ignore_dirs: HashSet<String>,
        matcher: Option<Box<dyn PathMatcher>>,
        detect_binary: bool,
        results: Sender<FileRecord>,
    ) -> Self {
        Self {
            root,
            ignore_dirs,
            matcher,
            detect_binary,
            results,
        }
    }

    /// Scan one walk-relative directory
    pub fn scan(&self, dir: &str, scheduler: &Scheduler<Self>) -> Result<()> {
        let full_path = if dir == ROOT {
            self.root.clone()
        } else {
            self.root.join(dir)
        };

        for entry in read_entries(&full_path)? {
            let path = child_path(dir, &entry.name);
            let is_dir = entry.file_type.is_dir();

            if let Some(matcher) = &self.matcher {
                if matcher.is_ignored(&path, is_dir) {
                    continue;
                }
            }

            if is_dir {
                if !self.ignore_dirs.contains(&entry.name) {
                    scheduler.dispatch(&path);
                }
                continue;
            }

            if !entry.file_type.is_file() {
                continue;
            }

            let mut file = FileRecord::new(path, entry.modified);
            if self.detect_binary {
                match sniff_binary(&entry.path) {
                    Ok(binary) => file.binary = binary,
                    Err(err) => tracing::error!("{}: {:#}", file.path, err),
                }
            }

            if self.results.send(file).is_err() {
                break; // Collector dropped
            }
        }

        Ok(())
    }
}

impl DirectoryVisitor for Scanner {
    fn visit(&self, dir: &str, scheduler: &Scheduler<Self>) {
        if let Err(err) = self.scan(dir, scheduler) {
            tracing::error!("{}: {:#}", dir, err);
        }
    }
}

/// Walk the whole tree below `options.root`
///
/// Records come back ordered by path, independent of how the scan was
/// scheduled.
pub fn walk(options: &WalkOptions) -> Result<Vec<FileRecord>> {
    let matcher = if options.use_gitignore {
        load_gitignore(&options.root)?.map(|gitignore| Box::new(gitignore) as Box<dyn PathMatcher>)
    } else {
        None
    };

    let (results_tx, results_rx) = unbounded();
    let scanner = Scanner::new(
        options.root.clone(),
        options.ignore_dirs.clone(),
        matcher,
        options.detect_binary,
        results_tx,
    );

    tracing::debug!(
        "walking {} with up to {} workers",
        options.root.display(),
        options.max_concurrency
    );

    let scheduler = Scheduler::new(scanner, options.max_concurrency);
    scheduler.dispatch(ROOT);
    scheduler.wait();

    let mut files: Vec<FileRecord> = results_rx.try_iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::debug!("walk found {} files", files.len());
    Ok(files)
}
