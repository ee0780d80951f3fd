//! Runs the HTTP API until interrupted.

use anyhow::Result;
use clap::Args;
use index_fund_core::ConfigLoader;
use index_fund_web_api::ApiServer;

/// Arguments for the server command.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Config file path (defaults to config/Config.toml)
    #[arg(short, long, env = "INDEX_FUND_CONFIG")]
    pub config: Option<String>,

    /// Config profile layered on top of the base file (e.g., "dev")
    #[arg(long, conflicts_with = "config")]
    pub profile: Option<String>,

    /// Server address, overrides the configured host and port
    #[arg(short, long)]
    pub addr: Option<String>,
}

/// Runs the server command.
///
/// # Errors
/// Returns an error if configuration cannot be loaded or the server fails to bind.
pub async fn run_server(args: ServerArgs) -> Result<()> {
    let config = match (&args.config, &args.profile) {
        (Some(path), _) => ConfigLoader::load_from(path)?,
        (None, Some(profile)) => ConfigLoader::load_with_profile(profile)?,
        (None, None) => ConfigLoader::load()?,
    };

    let addr = args.addr.unwrap_or_else(|| config.server.addr());
    tracing::info!(
        "Starting web API server on {} (CORS origins: {:?})",
        addr,
        config.cors.allowed_origins
    );

    ApiServer::new(config.cors)
        .serve_with_shutdown(&addr, shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to create SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
