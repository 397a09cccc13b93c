//! Search engine: credential state, strategy routing and fallback.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::backend::SearchBackend;
use crate::credentials::Credentials;
use crate::google::GoogleCseBackend;
use crate::mock::MockGenerator;
use crate::real::search_real;
use crate::types::{sort_by_confidence, ProspectRecord, SearchRequest};

/// Strategy chosen for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    RealSearch,
    Simulated,
}

/// Where the records of one search came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    RealApi,
    Simulated,
    /// The real search failed and simulated records were substituted.
    Fallback { error: String },
}

/// Records of one search plus their provenance.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub records: Vec<ProspectRecord>,
    pub data_source: DataSource,
}

/// Session-scoped prospect search engine.
///
/// Holds no records between calls. The only mutable state is the random
/// source and the advisory last-error message.
pub struct SearchEngine {
    backend: Option<Arc<dyn SearchBackend>>,
    generator: MockGenerator,
    rng: Mutex<StdRng>,
    last_error: Mutex<Option<String>>,
}

impl SearchEngine {
    /// Create an engine. Real search is enabled only when both credentials
    /// are present. Performs no network I/O.
    pub fn new(credentials: Credentials, timeout: Duration) -> Self {
        let backend = credentials.pair().map(|(key, cx)| -> Arc<dyn SearchBackend> {
            Arc::new(GoogleCseBackend::new(key, cx, timeout))
        });

        if backend.is_some() {
            tracing::info!("Search engine ready: Custom Search API configured");
        } else {
            tracing::info!("Search engine ready: no credentials, using simulated data");
        }

        Self::from_parts(backend)
    }

    /// Engine that only produces simulated records.
    pub fn simulated() -> Self {
        Self::from_parts(None)
    }

    /// Engine backed by an arbitrary search provider.
    pub fn with_backend(backend: Arc<dyn SearchBackend>) -> Self {
        tracing::info!("Search engine ready: backend {}", backend.name());
        Self::from_parts(Some(backend))
    }

    fn from_parts(backend: Option<Arc<dyn SearchBackend>>) -> Self {
        Self {
            backend,
            generator: MockGenerator::new(),
            rng: Mutex::new(StdRng::from_entropy()),
            last_error: Mutex::new(None),
        }
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// Seed the random source for reproducible simulated batches.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    /// Whether searches go to a real provider.
    pub fn using_real_api(&self) -> bool {
        self.backend.is_some()
    }

    /// Message of the most recent failed real search, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The strategy every search on this engine uses.
    pub fn route(&self) -> Strategy {
        if self.backend.is_some() {
            Strategy::RealSearch
        } else {
            Strategy::Simulated
        }
    }

    /// Search for prospects, sorted by confidence (highest first).
    ///
    /// Never fails: real-search errors are recorded and answered with
    /// simulated records.
    pub async fn search(&self, request: &SearchRequest) -> Vec<ProspectRecord> {
        self.search_report(request).await.records
    }

    /// Like [`search`](Self::search), also reporting where the data came from.
    pub async fn search_report(&self, request: &SearchRequest) -> SearchReport {
        let (mut records, data_source) = match (self.route(), &self.backend) {
            (Strategy::RealSearch, Some(backend)) => {
                match search_real(backend.as_ref(), request).await {
                    Ok(records) => {
                        tracing::info!("Real search returned {} prospects", records.len());
                        (records, DataSource::RealApi)
                    }
                    Err(e) => {
                        let error = e.to_string();
                        tracing::warn!("Real search failed, using simulated data: {error}");
                        self.record_error(&error);
                        (self.simulate(request), DataSource::Fallback { error })
                    }
                }
            }
            _ => (self.simulate(request), DataSource::Simulated),
        };

        sort_by_confidence(&mut records);
        SearchReport {
            records,
            data_source,
        }
    }

    fn simulate(&self, request: &SearchRequest) -> Vec<ProspectRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.generator.generate(&mut *rng, request)
    }

    fn record_error(&self, message: &str) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_credentials_is_simulated() {
        let engine = SearchEngine::new(Credentials::none(), Duration::from_secs(1));
        assert!(!engine.using_real_api());
        assert_eq!(engine.route(), Strategy::Simulated);
        assert!(engine.last_error().is_none());
    }

    #[test]
    fn test_partial_credentials_is_simulated() {
        let engine = SearchEngine::new(
            Credentials::new(Some("key".into()), None),
            Duration::from_secs(1),
        );
        assert!(!engine.using_real_api());
    }

    #[test]
    fn test_full_credentials_route_to_real() {
        let engine = SearchEngine::new(
            Credentials::new(Some("key".into()), Some("cx".into())),
            Duration::from_secs(1),
        );
        assert!(engine.using_real_api());
        assert_eq!(engine.route(), Strategy::RealSearch);
        assert_eq!(engine.route(), engine.route());
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchEngine>();
    }

    #[tokio::test]
    async fn test_seeded_engines_agree() {
        let req = SearchRequest::new("Construcción", "Lima", true);
        let a = SearchEngine::simulated().with_seed(9).search(&req).await;
        let b = SearchEngine::simulated().with_seed(9).search(&req).await;
        assert_eq!(a, b);
    }
}
