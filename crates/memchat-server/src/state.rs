//! Application state and configuration.

use std::sync::Arc;

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use memchat_engine::{ChatEngine, MAX_CONTEXT_TOKENS};
use memchat_memory::MAX_MEMORY_TURNS;
use memchat_runtime::{DType, Device};

use crate::service::ChatService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Chat orchestration; owns the session store.
    pub chat: Arc<ChatService>,
    /// Server configuration.
    pub config: ServerConfig,
    /// Process start time, reported by `/health`.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build state around an engine, with a fresh empty session store.
    pub fn new(engine: Arc<dyn ChatEngine>, config: ServerConfig) -> Self {
        Self {
            chat: Arc::new(ChatService::new(engine, &config)),
            config,
            started_at: Utc::now(),
        }
    }
}

/// Server configuration parameters.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Model name the engine is asked to report.
    pub model_name: String,
    /// Device the model runs on.
    pub device: Device,
    /// Parameter dtype.
    pub dtype: DType,
    /// The single origin allowed by CORS.
    pub allowed_origin: HeaderValue,
    /// Prompt token budget; longer prompts are truncated by the engine.
    pub max_context_tokens: usize,
    /// Turns retained per session.
    pub max_memory_turns: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_name: "google/gemma-3-270m-it".to_string(),
            device: Device::default(),
            dtype: DType::default(),
            allowed_origin: HeaderValue::from_static("http://localhost:3000"),
            max_context_tokens: MAX_CONTEXT_TOKENS,
            max_memory_turns: MAX_MEMORY_TURNS,
        }
    }
}
