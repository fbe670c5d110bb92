//! Job Board Alerts
//!
//! Polls hosted job boards (Greenhouse, Lever, Ashby), normalizes their
//! postings into one record shape, keeps those that were published inside a
//! lookback window and match an interest profile, drops anything reported
//! by an earlier run, and renders a digest of what is left.
//!
//! # Usage
//!
//! ```rust,ignore
//! use job_alerts::{run_once, AdapterSet, AlertsConfig, FileLedgerStore};
//!
//! let config = AlertsConfig::from_path("targets.json")?;
//! let store = FileLedgerStore::new("state.json");
//! let report = run_once(&config, AdapterSet::http(), &store, |digest| async move {
//!     tokio::fs::write("alert.md", digest).await
//! })
//! .await?;
//! println!("Done. New items: {}", report.accepted.len());
//! ```
//!
//! # Modules
//!
//! - [`types`] - Job record, configuration, interest profile, window
//! - [`traits`] - Core trait abstractions (SourceAdapter, LedgerStore)
//! - [`adapters`] - Provider adapters and the adapter registry
//! - [`pipeline`] - Window filter, matcher, text extraction, orchestration
//! - [`stores`] - Dedup ledger and its storage backends
//! - [`render`] - Digest rendering
//! - [`detect`] - Provider detection from careers pages
//! - [`testing`] - Scenario helpers for tests

pub mod adapters;
pub mod detect;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{AlertError, ConfigError, FetchError, LedgerError, Result};
pub use traits::{LedgerStore, SourceAdapter};
pub use types::{
    AlertsConfig, BoardTarget, CompanyTarget, InterestProfile, JobRecord, PortalTarget, RawPayload,
    Source, TargetConfig, Window,
};

// Re-export pipeline components
pub use pipeline::{
    in_window, matches, run_once, search_blob, sort_newest_first, AlertPipeline, RunReport,
    RunStats,
};

// Re-export adapters
pub use adapters::{
    AdapterSet, AshbyAdapter, CustomPortalAdapter, GreenhouseAdapter, LeverAdapter, MockAdapter,
};

// Re-export stores
pub use stores::{identity_key, DedupLedger, FileLedgerStore, MemoryLedgerStore};

pub use detect::{detect_provider, DetectedProvider, Detection, ProviderDetector};
pub use render::render_markdown;
