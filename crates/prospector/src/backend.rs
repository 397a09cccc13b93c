//! Search provider abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::ProspectResult;

/// Results requested per query (the free tier caps a page at 10).
pub const RESULTS_PER_QUERY: u32 = 10;

/// One organic result returned by a search provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub display_link: String,
    #[serde(default)]
    pub snippet: String,
}

impl SearchItem {
    pub fn new(title: impl Into<String>, display_link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            display_link: display_link.into(),
            ..Default::default()
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }
}

/// A web search provider queried by the real-search strategy.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run `query` and return at most `limit` items.
    async fn search(&self, query: &str, limit: u32) -> ProspectResult<Vec<SearchItem>>;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}
