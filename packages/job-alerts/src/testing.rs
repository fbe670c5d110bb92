//! Testing utilities.
//!
//! Useful for exercising the pipeline without network access or files.

use chrono::{DateTime, Duration, Utc};

use crate::adapters::{AdapterSet, MockAdapter};
use crate::stores::memory::MemoryLedgerStore;
use crate::types::job::{JobRecord, Source};

/// A record created `minutes` before `now`.
pub fn posted_ago(
    source: Source,
    id: &str,
    title: &str,
    now: DateTime<Utc>,
    minutes: i64,
) -> JobRecord {
    JobRecord::new(source, id, title).with_created_at(now - Duration::minutes(minutes))
}

/// Mocks for every provider plus an empty in-memory ledger.
///
/// Clones of the mocks share state with the ones registered in `adapters()`.
pub struct TestScenario {
    pub greenhouse: MockAdapter,
    pub lever: MockAdapter,
    pub ashby: MockAdapter,
    pub custom: MockAdapter,
    pub store: MemoryLedgerStore,
}

impl Default for TestScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScenario {
    pub fn new() -> Self {
        Self {
            greenhouse: MockAdapter::new(Source::Greenhouse),
            lever: MockAdapter::new(Source::Lever),
            ashby: MockAdapter::new(Source::Ashby),
            custom: MockAdapter::new(Source::Custom),
            store: MemoryLedgerStore::new(),
        }
    }

    /// An adapter set backed by this scenario's mocks.
    pub fn adapters(&self) -> AdapterSet {
        AdapterSet::new()
            .with(self.greenhouse.clone())
            .with(self.lever.clone())
            .with(self.ashby.clone())
            .with(self.custom.clone())
    }
}
