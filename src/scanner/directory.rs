use anyhow::{Context, Result};
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Version control directories skipped unless configured otherwise
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[".git", ".svn", ".hg"];

/// One direct child of a scanned directory
///
/// `file_type` and `modified` describe the entry itself, not a symlink
/// target.
#[derive(Debug)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub file_type: FileType,
    pub modified: SystemTime,
}

/// List the direct children of `dir`
///
/// Entries that vanish while listing, dangling symlinks and names that are not
/// valid UTF-8 are dropped from the listing. Any other failure, including a
/// symlink that cannot be resolved for a reason other than a missing target,
/// fails the whole listing.
pub fn read_entries(dir: &Path) -> Result<Vec<DirectoryEntry>> {
    let reader = fs::read_dir(dir)
        .with_context(|| format!("unable to open directory {}", dir.display()))?;

    let mut entries = Vec::new();
    for entry in reader {
        let entry =
            entry.with_context(|| format!("unable to read directory {}", dir.display()))?;
        let path = entry.path();
        let Some(metadata) = skip_missing(entry.metadata())
            .with_context(|| format!("unable to stat {}", path.display()))?
        else {
            continue;
        };

        if metadata.file_type().is_symlink()
            && skip_missing(fs::canonicalize(&path))
                .with_context(|| format!("unable to resolve symlink {}", path.display()))?
                .is_none()
        {
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!("skipping non UTF-8 name {:?} in {}", raw, dir.display());
                continue;
            }
        };

        entries.push(DirectoryEntry {
            name,
            file_type: metadata.file_type(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            path,
        });
    }

    Ok(entries)
}

/// `None` for a path that no longer exists
fn skip_missing<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Join a walk-relative parent and a child name
pub fn child_path(parent: &str, name: &str) -> String {
    if parent == super::types::ROOT {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
