//! Shared JSON-over-HTTP client for provider adapters.

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};

/// Request timeout for provider and careers-page fetches.
pub const TIMEOUT: Duration = Duration::from_secs(30);

/// Build a `reqwest::Client` with `timeout`.
///
/// If the builder fails (TLS backend unavailable), logs a warning and falls
/// back to a default client, which has no request timeout.
pub fn build_client(timeout: Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "HTTP client build failed, using default client without timeout");
            reqwest::Client::new()
        }
    }
}

/// Thin wrapper over `reqwest::Client` that sends provider headers and
/// decodes JSON bodies.
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: reqwest::Client,
    user_agent: String,
}

impl JsonClient {
    /// Create a client identifying itself as `user_agent`.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self::with_timeout(user_agent, TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            user_agent: user_agent.into(),
        }
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// GET `url` and parse the body as JSON.
    pub async fn get_json(&self, url: &str) -> FetchResult<Value> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        Ok(serde_json::from_str(&body)?)
    }
}
