//! Bounded fan-out for recursive work
//!
//! The [`Scheduler`] caps how many directory scans run at once without a
//! work queue: a dispatch either claims a free worker slot and runs on a new
//! thread, or runs inline on the thread that asked for it.
//!
//! ```text
//! dispatch(dir)
//!   ├─ running < max ─▶ spawn worker ─▶ visit(dir) ─▶ release slot
//!   └─ otherwise ─────▶ visit(dir) on the caller
//! ```
//!
//! Worker count defaults to the number of CPU cores reported by `num_cpus`.

pub mod scheduler;

// Re-export main types for easier access
pub use scheduler::{DirectoryVisitor, Scheduler};

/// Resolve a configured thread limit into a worker bound
///
/// `0` means one worker per available CPU core; negative values disable
/// workers entirely and the walk runs inline.
pub fn resolve_max_concurrency(max_threads: i64) -> usize {
    match max_threads {
        0 => num_cpus::get(),
        n if n < 0 => 0,
        n => usize::try_from(n).unwrap_or(usize::MAX),
    }
}
