//! Command-line and environment configuration.

use std::net::{IpAddr, SocketAddr};

use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use clap::Parser;
use memchat_engine::MAX_CONTEXT_TOKENS;
use memchat_memory::MAX_MEMORY_TURNS;
use memchat_runtime::{DType, Device};

use crate::state::ServerConfig;

/// memchat: chat completions with per-session memory
#[derive(Parser, Debug, Clone)]
#[command(name = "memchat-server", version)]
pub struct Cli {
    /// Address to bind.
    #[arg(long, env = "MEMCHAT_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "MEMCHAT_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Origin allowed to call the API from a browser.
    #[arg(long, env = "MEMCHAT_ALLOWED_ORIGIN", default_value = "http://localhost:3000")]
    pub allowed_origin: String,

    /// Model identifier reported in response metadata.
    #[arg(short, long, env = "MEMCHAT_MODEL", default_value = "google/gemma-3-270m-it")]
    pub model: String,

    /// Compute device (cpu, cuda, metal).
    #[arg(long, env = "MEMCHAT_DEVICE", default_value = "cpu")]
    pub device: Device,

    /// Parameter dtype (float32, float16, bfloat16).
    #[arg(long, env = "MEMCHAT_DTYPE", default_value = "float32")]
    pub dtype: DType,

    /// Maximum prompt tokens passed to the engine.
    #[arg(long, env = "MEMCHAT_MAX_CONTEXT_TOKENS", default_value_t = MAX_CONTEXT_TOKENS)]
    pub max_context_tokens: usize,

    /// Turns remembered per session.
    #[arg(long, env = "MEMCHAT_MAX_MEMORY_TURNS", default_value_t = MAX_MEMORY_TURNS)]
    pub max_memory_turns: usize,
}

/// Errors turning CLI arguments into a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid allowed origin `{origin}`: {source}")]
    InvalidOrigin {
        origin: String,
        source: InvalidHeaderValue,
    },
}

impl Cli {
    /// Socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Validate and convert into the runtime configuration.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let allowed_origin =
            HeaderValue::from_str(&self.allowed_origin).map_err(|source| ConfigError::InvalidOrigin {
                origin: self.allowed_origin.clone(),
                source,
            })?;

        Ok(ServerConfig {
            model_name: self.model.clone(),
            device: self.device,
            dtype: self.dtype,
            allowed_origin,
            max_context_tokens: self.max_context_tokens,
            max_memory_turns: self.max_memory_turns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_server_config() {
        let cli = Cli::parse_from(["memchat-server"]);
        assert_eq!(cli.socket_addr().to_string(), "127.0.0.1:8000");

        let config = cli.server_config().unwrap();
        let defaults = ServerConfig::default();
        assert_eq!(config.model_name, defaults.model_name);
        assert_eq!(config.allowed_origin, defaults.allowed_origin);
        assert_eq!(config.max_context_tokens, 1024);
        assert_eq!(config.max_memory_turns, 8);
    }

    #[test]
    fn parses_device_and_dtype() {
        let cli = Cli::parse_from([
            "memchat-server",
            "--device",
            "cuda",
            "--dtype",
            "bf16",
            "--port",
            "9000",
        ]);
        assert_eq!(cli.device, Device::Cuda);
        assert_eq!(cli.dtype, DType::BFloat16);
        assert_eq!(cli.port, 9000);
    }

    #[test]
    fn rejects_unknown_device() {
        assert!(Cli::try_parse_from(["memchat-server", "--device", "tpu"]).is_err());
    }

    #[test]
    fn rejects_bad_origin() {
        let cli = Cli::parse_from(["memchat-server", "--allowed-origin", "http://bad\norigin"]);
        assert!(matches!(
            cli.server_config(),
            Err(ConfigError::InvalidOrigin { .. })
        ));
    }
}
