//! facnet-web - incubation center directory service
//!
//! Loads the TOML configuration, picks a store backend and serves the HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use facnet_common::config::load_config;
use facnet_web::store::{CenterStore, MemoryStore, OfflineStore, RestStore};
use facnet_web::{build_router, AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for facnet-web
#[derive(Parser, Debug)]
#[command(name = "facnet-web")]
#[command(about = "Incubation center directory service")]
#[command(version)]
struct Args {
    /// Configuration file (overrides FACNET_CONFIG and the default location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides FACNET_PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Keep all data in process memory instead of the configured backend
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_source) =
        load_config(args.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("facnet_web={0},facnet_common={0},tower_http=info", config.logging.level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting facnet-web v{}",
        env!("CARGO_PKG_VERSION")
    );
    config_source.log();

    let store: Arc<dyn CenterStore> = if args.in_memory {
        info!("Using in-memory store");
        Arc::new(MemoryStore::new())
    } else if config.backend.is_configured() {
        let store = RestStore::new(&config.backend).context("Failed to create backend client")?;
        info!(
            backend = %config.backend.base_url().unwrap_or_default(),
            "Using REST backend"
        );
        Arc::new(store)
    } else {
        warn!("No backend configured, serving reference data and placeholders only");
        Arc::new(OfflineStore)
    };

    let app = build_router(AppState::new(store));

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    let local_addr = listener
        .local_addr()
        .context("Failed to read bound address")?;
    info!("facnet-web listening on http://{}", local_addr);
    info!("Health check: http://{}/health", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
