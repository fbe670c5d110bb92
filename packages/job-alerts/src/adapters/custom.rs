//! Placeholder for ad-hoc career portals.

use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchResult;
use crate::traits::adapter::SourceAdapter;
use crate::types::job::{JobRecord, Source};

/// Accepts custom portal targets and produces no postings.
///
/// Custom portals have no shared API; scraping them is not implemented.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomPortalAdapter;

impl CustomPortalAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceAdapter for CustomPortalAdapter {
    async fn fetch_jobs(&self, url: &str) -> FetchResult<Vec<JobRecord>> {
        debug!(url = %url, "custom portal: not implemented, skipping");
        Ok(Vec::new())
    }

    fn kind(&self) -> Source {
        Source::Custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_nothing() {
        let jobs = CustomPortalAdapter::new()
            .fetch_jobs("https://careers.example.com")
            .await
            .unwrap();
        assert!(jobs.is_empty());
    }
}
