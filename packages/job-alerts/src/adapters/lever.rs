//! Lever postings adapter.
//!
//! Endpoint: `GET {base}/v0/postings/{company}?mode=json`, returning a bare
//! array of postings. `createdAt` is epoch milliseconds.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::adapters::fields::{epoch_millis, job_id, kind_of, string_or_empty};
use crate::adapters::http::JsonClient;
use crate::error::{FetchError, FetchResult};
use crate::traits::adapter::SourceAdapter;
use crate::types::job::{JobRecord, Source};

pub const LEVER_API: &str = "https://api.lever.co";

/// Adapter for the public Lever postings API.
#[derive(Debug, Clone)]
pub struct LeverAdapter {
    client: JsonClient,
    base_url: String,
}

impl Default for LeverAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LeverAdapter {
    pub fn new() -> Self {
        Self {
            client: JsonClient::new("job-alerts/lever"),
            base_url: LEVER_API.to_string(),
        }
    }

    /// Point the adapter at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Postings endpoint for a company.
    pub fn endpoint(&self, company: &str) -> String {
        format!("{}/v0/postings/{}?mode=json", self.base_url, company)
    }
}

#[async_trait]
impl SourceAdapter for LeverAdapter {
    async fn fetch_jobs(&self, company: &str) -> FetchResult<Vec<JobRecord>> {
        let url = self.endpoint(company);
        let payload = self.client.get_json(&url).await?;
        parse_lever(&payload, &url)
    }

    fn kind(&self) -> Source {
        Source::Lever
    }
}

/// Normalize a Lever postings payload.
pub fn parse_lever(payload: &Value, url: &str) -> FetchResult<Vec<JobRecord>> {
    let postings = payload.as_array().ok_or_else(|| FetchError::Payload {
        url: url.to_string(),
        reason: format!("expected an array, got {}", kind_of(payload)),
    })?;

    let records: Vec<JobRecord> = postings.iter().filter_map(lever_record).collect();
    debug!(url = %url, total = postings.len(), parsed = records.len(), "lever: parsed postings");
    Ok(records)
}

fn lever_record(posting: &Value) -> Option<JobRecord> {
    if !posting.is_object() {
        debug!("lever: skipping non-object posting");
        return None;
    }

    let categories = posting.get("categories").cloned().unwrap_or(Value::Null);

    let mut job = JobRecord::new(
        Source::Lever,
        job_id(posting, &["id", "hostedUrl", "applyUrl"]),
        string_or_empty(posting, &["text", "title"]),
    )
    .with_location(string_or_empty(&categories, &["location"]))
    .with_team(string_or_empty(&categories, &["team"]))
    .with_url(string_or_empty(posting, &["hostedUrl", "applyUrl"]))
    .with_raw(posting.clone());
    job.created_at = epoch_millis(posting.get("createdAt"));
    Some(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_parses_postings() {
        let payload = json!([{
            "id": "5f1c-abc",
            "text": "Backend Engineer",
            "categories": {"location": "New York, NY", "team": "Platform", "commitment": "Full-time"},
            "hostedUrl": "https://jobs.lever.co/acme/5f1c-abc",
            "applyUrl": "https://jobs.lever.co/acme/5f1c-abc/apply",
            "createdAt": 1704888000000i64,
            "descriptionPlain": "Own our APIs"
        }]);

        let jobs = parse_lever(&payload, "u").unwrap();
        assert_eq!(jobs.len(), 1);

        let job = &jobs[0];
        assert_eq!(job.id, "5f1c-abc");
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.location, "New York, NY");
        assert_eq!(job.team, "Platform");
        assert_eq!(job.url, "https://jobs.lever.co/acme/5f1c-abc");
        assert_eq!(
            job.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap())
        );
        assert_eq!(job.source, Source::Lever);
    }

    #[test]
    fn test_id_and_url_fallbacks() {
        let payload = json!([
            {"title": "Designer", "applyUrl": "https://jobs.lever.co/acme/x/apply"},
            {"id": "y", "categories": null, "createdAt": "yesterday"}
        ]);

        let jobs = parse_lever(&payload, "u").unwrap();
        assert_eq!(jobs[0].id, "https://jobs.lever.co/acme/x/apply");
        assert_eq!(jobs[0].url, "https://jobs.lever.co/acme/x/apply");
        assert_eq!(jobs[0].title, "Designer");
        assert!(jobs[0].created_at.is_none());

        assert_eq!(jobs[1].location, "");
        assert_eq!(jobs[1].team, "");
        assert!(jobs[1].created_at.is_none());
    }

    #[test]
    fn test_object_payload_fails() {
        let result = parse_lever(&json!({"ok": false, "error": "Document not found"}), "u");
        assert!(matches!(result, Err(FetchError::Payload { .. })));
    }
}
