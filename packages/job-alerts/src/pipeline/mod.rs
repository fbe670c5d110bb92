//! The alert pipeline.
//!
//! The pipeline orchestrates:
//! - Window filtering on publication time
//! - Profile matching over a per-record search blob
//! - Deduplication against the ledger
//! - Newest-first ordering of what survives

pub mod matcher;
pub mod run;
pub mod text;
pub mod window;

pub use matcher::{any_contains, matches, mismatch_reason, none_contains, Mismatch};
pub use run::{run_once, sort_newest_first, AlertPipeline, RunReport, RunStats};
pub use text::{search_blob, DESCRIPTION_KEYS};
pub use window::in_window;
