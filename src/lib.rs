//! # prols - rule-based project file listing
//!
//! Lists every file below the current directory ordered by a score computed
//! from configurable rules, for editors and fuzzy finders that want the most
//! relevant files first.
//!
//! ## Pipeline
//!
//! ```text
//! Scheduler::dispatch(".") ─▶ Scanner::scan(dir) ─┬─▶ dispatch(subdir) ...
//!                                                 └─▶ FileRecord ─▶ collector
//! Scheduler::wait() ─▶ Ranker::rank ─▶ one path per line on stdout
//! ```
//!
//! ## Example configuration
//!
//! ```yaml
//! ignore_dirs: [.git, node_modules]
//! hide_negative: true
//! rules:
//!   - suffix: .go
//!     score: 10
//!   - prefix: vendor/
//!     score: -100
//! presort:
//!   - field: depth
//! ```

pub mod cli;
pub mod config;
pub mod parallel;
pub mod ranking;
pub mod rules;
pub mod scanner;

pub use cli::Cli;
pub use config::ProlsConfig;

/// Result type alias for prols operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
