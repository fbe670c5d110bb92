//! Greenhouse job board adapter.
//!
//! Endpoint: `GET {base}/v1/boards/{board}/jobs?content=true`, returning
//! `{"jobs": [...]}`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::adapters::fields::{iso_datetime_either, job_id, jobs_array, location_name, string_or_empty};
use crate::adapters::http::JsonClient;
use crate::error::FetchResult;
use crate::traits::adapter::SourceAdapter;
use crate::types::job::{JobRecord, Source};

pub const GREENHOUSE_API: &str = "https://boards-api.greenhouse.io";

/// Adapter for the public Greenhouse job board API.
#[derive(Debug, Clone)]
pub struct GreenhouseAdapter {
    client: JsonClient,
    base_url: String,
}

impl Default for GreenhouseAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl GreenhouseAdapter {
    pub fn new() -> Self {
        Self {
            client: JsonClient::new("job-alerts/greenhouse"),
            base_url: GREENHOUSE_API.to_string(),
        }
    }

    /// Point the adapter at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Listing endpoint for a board.
    pub fn endpoint(&self, board: &str) -> String {
        format!("{}/v1/boards/{}/jobs?content=true", self.base_url, board)
    }
}

#[async_trait]
impl SourceAdapter for GreenhouseAdapter {
    async fn fetch_jobs(&self, board: &str) -> FetchResult<Vec<JobRecord>> {
        let url = self.endpoint(board);
        let payload = self.client.get_json(&url).await?;
        parse_greenhouse(&payload, &url)
    }

    fn kind(&self) -> Source {
        Source::Greenhouse
    }
}

/// Normalize a Greenhouse board payload.
pub fn parse_greenhouse(payload: &Value, url: &str) -> FetchResult<Vec<JobRecord>> {
    let jobs = jobs_array(payload, url)?;
    let records: Vec<JobRecord> = jobs.iter().filter_map(greenhouse_record).collect();
    debug!(url = %url, total = jobs.len(), parsed = records.len(), "greenhouse: parsed board");
    Ok(records)
}

fn greenhouse_record(item: &Value) -> Option<JobRecord> {
    if !item.is_object() {
        debug!("greenhouse: skipping non-object job entry");
        return None;
    }

    let mut job = JobRecord::new(
        Source::Greenhouse,
        job_id(item, &["id"]),
        string_or_empty(item, &["title"]),
    )
    .with_location(location_name(item.get("location")))
    .with_url(string_or_empty(item, &["absolute_url"]))
    .with_raw(item.clone());
    job.created_at = iso_datetime_either(item, "created_at", "createdAt");
    Some(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_parses_board() {
        let payload = json!({
            "jobs": [{
                "id": 4012345,
                "title": "Senior Engineer",
                "location": {"name": "Remote - US"},
                "absolute_url": "https://boards.greenhouse.io/acme/jobs/4012345",
                "created_at": "2024-01-10T07:00:00-05:00",
                "content": "&lt;p&gt;Build things&lt;/p&gt;"
            }],
            "meta": {"total": 1}
        });

        let jobs = parse_greenhouse(&payload, "u").unwrap();
        assert_eq!(jobs.len(), 1);

        let job = &jobs[0];
        assert_eq!(job.id, "4012345");
        assert_eq!(job.title, "Senior Engineer");
        assert_eq!(job.location, "Remote - US");
        assert_eq!(job.url, "https://boards.greenhouse.io/acme/jobs/4012345");
        assert_eq!(
            job.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap())
        );
        assert_eq!(job.source, Source::Greenhouse);
        assert_eq!(job.raw.str_field("content"), Some("&lt;p&gt;Build things&lt;/p&gt;"));
    }

    #[test]
    fn test_degrades_bad_fields_per_record() {
        let payload = json!({
            "jobs": [
                {"id": 1, "title": null, "location": 7, "created_at": "soon", "createdAt": "2024-01-10T12:00:00Z"},
                {"id": 2, "location": "Berlin", "created_at": "garbage"},
                "not a job"
            ]
        });

        let jobs = parse_greenhouse(&payload, "u").unwrap();
        assert_eq!(jobs.len(), 2);

        assert_eq!(jobs[0].title, "");
        assert_eq!(jobs[0].location, "");
        assert!(jobs[0].created_at.is_some());

        assert_eq!(jobs[1].location, "Berlin");
        assert!(jobs[1].created_at.is_none());
        assert_eq!(jobs[1].url, "");
    }

    #[test]
    fn test_malformed_top_level_fails() {
        assert!(parse_greenhouse(&json!([1, 2]), "u").is_err());
        assert!(parse_greenhouse(&json!({"jobs": {}}), "u").is_err());
    }

    #[test]
    fn test_endpoint() {
        let adapter = GreenhouseAdapter::new().with_base_url("http://localhost:9000/");
        assert_eq!(
            adapter.endpoint("acme"),
            "http://localhost:9000/v1/boards/acme/jobs?content=true"
        );
    }
}
