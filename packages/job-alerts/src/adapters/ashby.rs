//! Ashby job board adapter.
//!
//! Endpoint: `GET {base}/posting-api/job-board/{board}`, returning
//! `{"jobs": [...]}`. Publication time is `publishedAt`, else `createdAt`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::adapters::fields::{iso_datetime_either, job_id, jobs_array, location_name, string_or_empty};
use crate::adapters::http::JsonClient;
use crate::error::FetchResult;
use crate::traits::adapter::SourceAdapter;
use crate::types::job::{JobRecord, Source};

pub const ASHBY_API: &str = "https://api.ashbyhq.com";

/// Adapter for the public Ashby posting API.
#[derive(Debug, Clone)]
pub struct AshbyAdapter {
    client: JsonClient,
    base_url: String,
}

impl Default for AshbyAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AshbyAdapter {
    pub fn new() -> Self {
        Self {
            client: JsonClient::new("job-alerts/ashby"),
            base_url: ASHBY_API.to_string(),
        }
    }

    /// Point the adapter at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self, board: &str) -> String {
        format!("{}/posting-api/job-board/{}", self.base_url, board)
    }
}

#[async_trait]
impl SourceAdapter for AshbyAdapter {
    async fn fetch_jobs(&self, board: &str) -> FetchResult<Vec<JobRecord>> {
        let url = self.endpoint(board);
        let payload = self.client.get_json(&url).await?;
        parse_ashby(&payload, &url)
    }

    fn kind(&self) -> Source {
        Source::Ashby
    }
}

/// Normalize an Ashby job board payload.
pub fn parse_ashby(payload: &Value, url: &str) -> FetchResult<Vec<JobRecord>> {
    let jobs = jobs_array(payload, url)?;
    let records: Vec<JobRecord> = jobs.iter().filter_map(ashby_record).collect();
    debug!(url = %url, total = jobs.len(), parsed = records.len(), "ashby: parsed board");
    Ok(records)
}

fn ashby_record(item: &Value) -> Option<JobRecord> {
    if !item.is_object() {
        debug!("ashby: skipping non-object job entry");
        return None;
    }

    let mut job = JobRecord::new(
        Source::Ashby,
        job_id(item, &["id", "_id"]),
        string_or_empty(item, &["title"]),
    )
    .with_location(location_name(item.get("location")))
    .with_url(string_or_empty(item, &["jobUrl", "applyUrl"]))
    .with_raw(item.clone());
    job.created_at = iso_datetime_either(item, "publishedAt", "createdAt");
    Some(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{matches, search_blob};
    use crate::types::config::{InterestProfile, Window};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_parses_board() {
        let payload = json!({
            "apiVersion": "1",
            "jobs": [{
                "id": "b2f1",
                "title": "Staff Engineer",
                "location": "San Francisco",
                "department": "Engineering",
                "jobUrl": "https://jobs.ashbyhq.com/acme/b2f1",
                "applyUrl": "https://jobs.ashbyhq.com/acme/b2f1/application",
                "publishedAt": "2024-01-10T12:00:00.000+00:00",
                "descriptionPlain": "Scale the platform"
            }]
        });

        let jobs = parse_ashby(&payload, "u").unwrap();
        let job = &jobs[0];
        assert_eq!(job.id, "b2f1");
        assert_eq!(job.location, "San Francisco");
        assert_eq!(job.team, "");
        assert_eq!(job.url, "https://jobs.ashbyhq.com/acme/b2f1");
        assert_eq!(
            job.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap())
        );
        assert_eq!(job.source, Source::Ashby);
    }

    #[test]
    fn test_fallbacks() {
        let payload = json!({
            "jobs": [{
                "_id": "legacy",
                "title": "Analyst",
                "location": {"name": "Remote"},
                "applyUrl": "https://jobs.ashbyhq.com/acme/legacy/application",
                "publishedAt": "",
                "createdAt": "2024-01-09T00:00:00Z"
            }]
        });

        let jobs = parse_ashby(&payload, "u").unwrap();
        let job = &jobs[0];
        assert_eq!(job.id, "legacy");
        assert_eq!(job.location, "Remote");
        assert_eq!(job.url, "https://jobs.ashbyhq.com/acme/legacy/application");
        assert_eq!(
            job.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_department_stays_out_of_search_text() {
        let payload = json!({
            "jobs": [{
                "id": "ae1",
                "title": "Account Executive",
                "location": "New York",
                "department": "Engineering Sales",
                "publishedAt": "2024-01-10T12:00:00Z"
            }]
        });
        let profile = InterestProfile::new(Window::parse("1h").unwrap())
            .with_excludes(vec!["engineering".to_string()]);

        let jobs = parse_ashby(&payload, "u").unwrap();
        let blob = search_blob(&jobs[0]);

        assert_eq!(jobs[0].team, "");
        assert!(!blob.contains("engineering"));
        assert!(matches(&blob, &profile));
    }

    #[test]
    fn test_missing_jobs_is_empty() {
        assert!(parse_ashby(&json!({"apiVersion": "1"}), "u").unwrap().is_empty());
    }
}
