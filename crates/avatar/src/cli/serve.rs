//! The `avatar serve` command.

use crate::server::{router, AppState};
use avatar_core::{AvatarError, Config, Dispatcher, ProviderConfig};
use clap::Args;
use std::sync::Arc;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Execute the serve command.
///
/// Provider configuration is resolved once here; a missing credential stops
/// startup instead of failing every request.
pub async fn execute(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let provider = ProviderConfig::resolve().map_err(AvatarError::from)?;
    let dispatcher = Dispatcher::new(&provider, &config.inference).map_err(AvatarError::from)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(
        provider = %provider.kind(),
        model = provider.model_id().unwrap_or("-"),
        "Starting Avatar API v{}",
        avatar_core::VERSION
    );
    if !config.output.unique_api_files {
        tracing::warn!(
            "output.unique_api_files is off: concurrent requests overwrite {}",
            config.output_dir().display()
        );
    }

    let app = router(Arc::new(AppState { dispatcher, config }));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
