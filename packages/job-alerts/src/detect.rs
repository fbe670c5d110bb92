//! Provider detection from careers pages.
//!
//! Scans a careers page for links to a hosted job board and reports which
//! provider (and slug) to configure. One-shot utility; not part of a run.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::adapters::http::{build_client, TIMEOUT};
use crate::error::{FetchError, FetchResult};

const USER_AGENT: &str = "job-alerts/detect";
const MAX_BYTES: usize = 800_000;

/// Provider inferred from a careers page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedProvider {
    Greenhouse { board: String },
    Lever { company: String },
    Ashby { board: String },
    /// No known board link found
    Custom,
}

/// One detection result, shaped for `detected.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub url: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Detection {
    fn base(url: &str, provider: &str) -> Self {
        Self {
            url: url.to_string(),
            provider: provider.to_string(),
            board: None,
            company: None,
            error: None,
        }
    }

    /// Result for a page that was fetched and scanned.
    pub fn found(url: &str, provider: DetectedProvider) -> Self {
        match provider {
            DetectedProvider::Greenhouse { board } => Self {
                board: Some(board),
                ..Self::base(url, "greenhouse")
            },
            DetectedProvider::Lever { company } => Self {
                company: Some(company),
                ..Self::base(url, "lever")
            },
            DetectedProvider::Ashby { board } => Self {
                board: Some(board),
                ..Self::base(url, "ashby")
            },
            DetectedProvider::Custom => Self::base(url, "custom"),
        }
    }

    /// Result for a page that could not be fetched.
    pub fn failed(url: &str, error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::base(url, "unknown")
        }
    }
}

struct Patterns {
    greenhouse: Regex,
    lever: Regex,
    ashby: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        greenhouse: Regex::new(r"https?://(?:boards|job-boards)\.greenhouse\.io/([a-z0-9\-_]+)")
            .expect("valid greenhouse pattern"),
        lever: Regex::new(r"https?://jobs\.lever\.co/([a-z0-9\-_]+)").expect("valid lever pattern"),
        ashby: Regex::new(r"https?://jobs\.ashbyhq\.com/([a-z0-9\-_]+)")
            .expect("valid ashby pattern"),
    })
}

fn first_slug(pattern: &Regex, html: &str) -> Option<String> {
    pattern
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Detect the provider linked from a page.
///
/// Greenhouse wins over Lever, Lever over Ashby, when a page links several.
pub fn detect_provider(html: &str) -> DetectedProvider {
    let html = html.to_lowercase();
    let p = patterns();

    if let Some(board) = first_slug(&p.greenhouse, &html) {
        DetectedProvider::Greenhouse { board }
    } else if let Some(company) = first_slug(&p.lever, &html) {
        DetectedProvider::Lever { company }
    } else if let Some(board) = first_slug(&p.ashby, &html) {
        DetectedProvider::Ashby { board }
    } else {
        DetectedProvider::Custom
    }
}

/// Non-empty, trimmed lines of a URL list file.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fetches careers pages and detects their provider.
pub struct ProviderDetector {
    client: reqwest::Client,
    max_bytes: usize,
}

impl Default for ProviderDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderDetector {
    pub fn new() -> Self {
        Self {
            client: build_client(TIMEOUT),
            max_bytes: MAX_BYTES,
        }
    }

    /// Cap how much of each page is read.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Detect each URL in order. A page that fails to load yields an `unknown` entry.
    pub async fn detect_all(&self, urls: &[String]) -> Vec<Detection> {
        let mut found = Vec::with_capacity(urls.len());
        for url in urls {
            match self.fetch_html(url).await {
                Ok(html) => {
                    let provider = detect_provider(&html);
                    debug!(url = %url, provider = ?provider, "detected");
                    found.push(Detection::found(url, provider));
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "detect: fetch failed");
                    found.push(Detection::failed(url, e));
                }
            }
        }
        found
    }

    /// Read at most `max_bytes` of a page, decoding lossily as UTF-8.
    pub async fn fetch_html(&self, url: &str) -> FetchResult<String> {
        let mut response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "text/html,*/*")
            .send()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let mut body: Vec<u8> = Vec::new();
        while body.len() < self.max_bytes {
            match response
                .chunk()
                .await
                .map_err(|e| FetchError::Http(Box::new(e)))?
            {
                Some(chunk) => body.extend_from_slice(&chunk),
                None => break,
            }
        }
        body.truncate(self.max_bytes);

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_greenhouse_variants() {
        let html = r#"<a href="https://job-boards.greenhouse.io/Acme-Co/jobs/1">Jobs</a>"#;
        assert_eq!(
            detect_provider(html),
            DetectedProvider::Greenhouse {
                board: "acme-co".to_string()
            }
        );
        assert_eq!(
            detect_provider("see http://boards.greenhouse.io/acme"),
            DetectedProvider::Greenhouse {
                board: "acme".to_string()
            }
        );
    }

    #[test]
    fn test_priority_order() {
        let html = "https://jobs.ashbyhq.com/a https://jobs.lever.co/l";
        assert_eq!(
            detect_provider(html),
            DetectedProvider::Lever {
                company: "l".to_string()
            }
        );
        assert_eq!(
            detect_provider("https://jobs.ashbyhq.com/a_b"),
            DetectedProvider::Ashby {
                board: "a_b".to_string()
            }
        );
    }

    #[test]
    fn test_no_board_is_custom() {
        assert_eq!(
            detect_provider("<html>Careers at Acme</html>"),
            DetectedProvider::Custom
        );
    }

    #[test]
    fn test_detection_json_shape() {
        let found = Detection::found(
            "https://acme.com/careers",
            DetectedProvider::Lever {
                company: "acme".to_string(),
            },
        );
        assert_eq!(
            serde_json::to_value(&found).unwrap(),
            serde_json::json!({"url": "https://acme.com/careers", "provider": "lever", "company": "acme"})
        );

        let failed = Detection::failed("https://down.example", "timeout");
        assert_eq!(failed.provider, "unknown");
        assert_eq!(failed.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_parse_url_list() {
        let urls = parse_url_list("https://a.com\n\n  https://b.com  \n");
        assert_eq!(urls, vec!["https://a.com", "https://b.com"]);
    }
}
