//! Error types for the REST wrapper and CLI.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// All errors the server can surface.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("Search task failed: {0}")]
    SearchTask(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
