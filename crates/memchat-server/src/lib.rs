//! # memchat-server
//!
//! Chat-completion HTTP API with per-(user, session) conversational memory.
//!
//! Wraps any [`memchat_engine::ChatEngine`] behind a small REST surface:
//! `POST /chat`, `GET /get_chats/{user_id}`, `GET /get_all_chats`,
//! `GET /presets` and `GET /health`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod presets;
pub mod server;
pub mod service;
pub mod state;

pub use config::{Cli, ConfigError};
pub use error::ServerError;
pub use server::{create_router, run_server};
pub use service::ChatService;
pub use state::{AppState, ServerConfig};
