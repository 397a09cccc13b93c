//! HTTP transport: REST wrapper over a shared [`SearchEngine`].
//!
//! One engine is built at startup and handed to every handler through axum
//! state. Searches never fail at the engine level; the only error path left
//! is the search task itself dying, which maps to a 500 with a `detail`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use prospector::{to_csv_string, ProspectRecord, SearchEngine, SearchRequest, EXPORT_FILENAME};

use crate::error::{ServerError, ServerResult};

/// Build the axum Router with all endpoints.
pub fn router(engine: Arc<SearchEngine>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/search", post(handle_search))
        .route("/search/csv", post(handle_search_csv))
        .layer(cors)
        .with_state(engine)
}

/// REST transport bound to one engine.
pub struct HttpTransport {
    engine: Arc<SearchEngine>,
}

impl HttpTransport {
    pub fn new(engine: Arc<SearchEngine>) -> Self {
        Self { engine }
    }

    /// Run the HTTP server on the given address.
    pub async fn run(&self, addr: &str) -> ServerResult<()> {
        let app = router(self.engine.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("REST API listening on http://{addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;

        Ok(())
    }
}

/// Run the search on its own task so a panic becomes a 500 instead of a dropped connection.
async fn run_search(
    engine: Arc<SearchEngine>,
    request: SearchRequest,
) -> ServerResult<Vec<ProspectRecord>> {
    tokio::spawn(async move { engine.search(&request).await })
        .await
        .map_err(|e| ServerError::SearchTask(e.to_string()))
}

async fn handle_root(State(engine): State<Arc<SearchEngine>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "online",
        "message": "Prospector SSOMA API Ready",
        "using_real_api": engine.using_real_api(),
        "last_error": engine.last_error(),
    }))
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_search(
    State(engine): State<Arc<SearchEngine>>,
    Json(request): Json<SearchRequest>,
) -> ServerResult<Json<Vec<ProspectRecord>>> {
    tracing::info!(
        "Search: sector={:?} location={:?} deep={}",
        request.sector,
        request.location,
        request.deep_search
    );
    let records = run_search(engine, request).await?;
    Ok(Json(records))
}

async fn handle_search_csv(
    State(engine): State<Arc<SearchEngine>>,
    Json(request): Json<SearchRequest>,
) -> ServerResult<impl IntoResponse> {
    let records = run_search(engine, request).await?;
    let disposition = format!("attachment; filename=\"{EXPORT_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        to_csv_string(&records),
    ))
}
