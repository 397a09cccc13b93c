//! Google Custom Search JSON API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::backend::{SearchBackend, SearchItem};
use crate::types::{ProspectError, ProspectResult};

/// Production endpoint of the Custom Search JSON API.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Custom Search backend keyed by an API key and a search-engine id (`cx`).
pub struct GoogleCseBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    cse_id: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GoogleCseBackend {
    pub fn new(api_key: impl Into<String>, cse_id: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            cse_id: cse_id.into(),
        }
    }

    /// Point the client at another endpoint (proxies, test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchBackend for GoogleCseBackend {
    async fn search(&self, query: &str, limit: u32) -> ProspectResult<Vec<SearchItem>> {
        let num = limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The API reports quota and key problems in a JSON envelope.
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            return Err(ProspectError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| ProspectError::MalformedResponse(e.to_string()))?;

        tracing::debug!("Custom Search returned {} items", parsed.items.len());

        let mut items = parsed.items;
        items.truncate(limit as usize);
        Ok(items)
    }

    fn name(&self) -> &str {
        "google-cse"
    }
}
