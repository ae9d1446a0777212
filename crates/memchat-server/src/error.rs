//! HTTP error handling and response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use memchat_engine::EngineError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("generation worker failed: {0}")]
    Worker(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ServerError::Engine(EngineError::Tokenization(msg)) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error", msg)
            }
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error", msg)
            }
            ServerError::UnknownPreset(key) => (
                StatusCode::BAD_REQUEST,
                "invalid_request_error",
                format!("unknown preset `{key}`"),
            ),
            ServerError::Engine(EngineError::ModelLoad(msg)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error", msg)
            }
            ServerError::Engine(EngineError::Inference(msg)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error", msg)
            }
            ServerError::Worker(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error", msg),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::warn!(%status, %message, "request rejected");
        }

        let body = Json(json!({
            "error": {
                "message": message,
                "type": error_type,
                "param": null,
                "code": null,
            }
        }));

        (status, body).into_response()
    }
}
