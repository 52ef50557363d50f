use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors raised by the dashboard core, the data loader and the renderer.
///
/// A year or metric that simply has no rows is not an error: those paths
/// return empty results so the page can show a "no data" state.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid data in {file}: {message}")]
    InvalidData { file: String, message: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DashboardError {
    pub fn invalid_data(file: &str, message: impl Into<String>) -> Self {
        DashboardError::InvalidData {
            file: file.to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("❌ Request failed: {}", self);
        }

        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
