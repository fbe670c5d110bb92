//! Mock adapter for testing.
//!
//! Provides a configurable mock implementation of the SourceAdapter trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::adapter::SourceAdapter;
use crate::types::job::{JobRecord, Source};

/// Mock adapter for testing.
///
/// Returns canned records (or a canned failure) per identifier. Unknown
/// identifiers yield an empty board.
///
/// # Example
///
/// ```rust
/// use job_alerts::adapters::MockAdapter;
/// use job_alerts::{JobRecord, Source};
///
/// let mock = MockAdapter::new(Source::Greenhouse)
///     .with_jobs("acme", vec![JobRecord::new(Source::Greenhouse, "1", "Engineer")])
///     .with_failure("broken");
/// ```
#[derive(Clone)]
pub struct MockAdapter {
    kind: Source,
    boards: Arc<RwLock<HashMap<String, Vec<JobRecord>>>>,
    failures: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockAdapter {
    /// Create an empty mock for a provider.
    pub fn new(kind: Source) -> Self {
        Self {
            kind,
            boards: Arc::default(),
            failures: Arc::default(),
            calls: Arc::default(),
        }
    }

    /// Set the records returned for an identifier.
    pub fn set_jobs(&self, identifier: impl Into<String>, jobs: Vec<JobRecord>) {
        self.boards.write().unwrap().insert(identifier.into(), jobs);
    }

    /// Set the records returned for an identifier (builder pattern).
    pub fn with_jobs(self, identifier: impl Into<String>, jobs: Vec<JobRecord>) -> Self {
        self.set_jobs(identifier, jobs);
        self
    }

    /// Make fetches for an identifier fail wholesale (builder pattern).
    pub fn with_failure(self, identifier: impl Into<String>) -> Self {
        self.failures.write().unwrap().push(identifier.into());
        self
    }

    /// Identifiers fetched, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl SourceAdapter for MockAdapter {
    async fn fetch_jobs(&self, identifier: &str) -> FetchResult<Vec<JobRecord>> {
        self.calls.write().unwrap().push(identifier.to_string());

        if self.failures.read().unwrap().iter().any(|f| f == identifier) {
            return Err(FetchError::Status {
                status: 503,
                url: format!("mock://{}/{}", self.kind.slug(), identifier),
            });
        }

        Ok(self
            .boards
            .read()
            .unwrap()
            .get(identifier)
            .cloned()
            .unwrap_or_default())
    }

    fn kind(&self) -> Source {
        self.kind
    }
}
