//! Multi-stage ordering of scanned files
//!
//! Runs single-threaded once the walk has finished. See [`Ranker`] for the
//! stage order.

pub mod pipeline;
pub mod presort;

// Re-export main types for easier access
pub use pipeline::{RankOptions, Ranker};
pub use presort::{PreSort, SortField};
