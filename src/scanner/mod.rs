//! Concurrent directory scanner
//!
//! The walk starts at the root with one [`Scheduler::dispatch`] call; every
//! directory scan dispatches its subdirectories in turn. Regular files become
//! [`FileRecord`]s which are collected once the scheduler has drained.
//!
//! [`Scheduler::dispatch`]: crate::parallel::Scheduler::dispatch

pub mod binary;
pub mod core;
pub mod directory;
pub mod gitignore;
pub mod types;

// Re-export main types for easier access
pub use self::core::{Scanner, walk};
pub use directory::DEFAULT_IGNORE_DIRS;
pub use gitignore::PathMatcher;
pub use types::{FileRecord, ROOT, WalkOptions};
