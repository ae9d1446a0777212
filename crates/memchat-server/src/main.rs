use clap::Parser;
use memchat_runtime::MockEngine;
use memchat_server::{run_server, AppState, Cli};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG wins; default to info.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = cli.server_config()?;

    // Create engine
    let engine = Arc::new(MockEngine::new().with_model(
        config.model_name.clone(),
        config.device,
        config.dtype,
    ));
    tracing::info!(
        model = %config.model_name,
        device = %config.device,
        dtype = %config.dtype,
        max_memory_turns = config.max_memory_turns,
        "engine ready"
    );

    let state = AppState::new(engine, config);

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    run_server(state, cli.socket_addr(), shutdown).await?;
    tracing::info!("server stopped");
    Ok(())
}

/// Cancel `token` on Ctrl+C or SIGTERM. Sessions are not flushed anywhere.
async fn shutdown_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
    token.cancel();
}
