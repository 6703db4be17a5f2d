//! Open MaduraAI quick tools server
//!
//! HTTP endpoints for listing, searching and executing the quick tools.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, record_request};
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use maduraai_config::ConfigError;
use maduraai_core::{ErrorCode, ToolError};
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Tool(e) => match e.code {
                ErrorCode::InvalidParams | ErrorCode::ParseError | ErrorCode::InvalidRequest => {
                    StatusCode::BAD_REQUEST
                },
                ErrorCode::MethodNotFound => StatusCode::NOT_FOUND,
                ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
                ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        let body = match &self {
            ServerError::Tool(e) => serde_json::json!({
                "error": {
                    "code": e.code.code(),
                    "message": e.message,
                    "data": e.data,
                }
            }),
            other => serde_json::json!({
                "error": { "message": other.to_string() }
            }),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(body)).into_response()
    }
}
