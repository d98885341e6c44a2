//! Pastebin server entrypoint.

use clap::Parser;
use pastebin_core::config::env_flag_enabled;
use pastebin_server::{
    resolve_bind_address, serve_router, warn_if_public_bind, AppState, Config, Database,
    StorageBackend,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line overrides. Anything left unset comes from the environment.
#[derive(Debug, Parser)]
#[command(name = "pastebin", version, about = "Minimal web pastebin")]
struct Args {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
    /// Storage backend: files or sqlite (overrides STORAGE_BACKEND)
    #[arg(long)]
    backend: Option<StorageBackend>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pastebin=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env();
    args.apply(&mut config);

    warn_if_public_bind(&config, env_flag_enabled("ALLOW_PUBLIC_ACCESS"));

    let db = Database::open(&config)?;
    let addr = resolve_bind_address(&config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Pastebin listening on http://{} ({} storage)",
        listener.local_addr()?,
        config.backend
    );

    let state = AppState::new(config, db);
    serve_router(listener, state, shutdown_signal()).await?;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
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
    tracing::info!("Shutdown signal received");
}
