//! Source adapter trait for pluggable job boards.
//!
//! Each provider (Greenhouse, Lever, Ashby, custom portals) implements
//! [`SourceAdapter`]; the pipeline selects one per target by [`Source`].
//!
//! # Failure model
//!
//! - A fetch that cannot produce any records (transport error, non-2xx,
//!   malformed top-level payload) returns `Err(FetchError)`.
//! - A single record with a bad field is still returned, with that field
//!   blanked (empty string, `created_at: None`).
//!
//! # Usage
//!
//! ```rust,ignore
//! use job_alerts::adapters::GreenhouseAdapter;
//! use job_alerts::SourceAdapter;
//!
//! let adapter = GreenhouseAdapter::new();
//! let jobs = adapter.fetch_jobs("acme").await?;
//! ```

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::job::{JobRecord, Source};

/// Fetches one board's postings and normalizes them.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Fetch all postings for a board slug, company slug, or portal URL.
    async fn fetch_jobs(&self, identifier: &str) -> FetchResult<Vec<JobRecord>>;

    /// Which provider this adapter speaks to.
    fn kind(&self) -> Source;

    /// Adapter name (for logging/debugging).
    fn name(&self) -> &str {
        self.kind().slug()
    }
}

