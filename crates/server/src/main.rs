//! filestash server binary.

use anyhow::{Context, Result};
use clap::Parser;
use filestash_server::{AppState, consistency, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// filestash - store files over HTTP and fetch them back by identifier
#[derive(Parser, Debug)]
#[command(name = "filestashd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "FILESTASH_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing args so FILESTASH_CONFIG can come from it
    let dotenv = dotenvy::dotenv();

    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load environment file"),
    }

    // Startup banner
    tracing::info!("filestash v{}", env!("CARGO_PKG_VERSION"));

    let config = filestash_server::config::load(std::path::Path::new(&args.config))
        .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    // Initialize storage backend
    let storage = filestash_storage::from_config(&config.storage)
        .await
        .context("failed to initialize storage")?;
    tracing::info!(backend = storage.backend_name(), "Storage backend initialized");

    // Verify storage before accepting requests
    storage
        .health_check()
        .await
        .context("storage health check failed")?;

    // Initialize metadata store
    let metadata = filestash_metadata::from_config(&config.metadata)
        .await
        .context("failed to initialize metadata store")?;
    tracing::info!("Metadata store initialized");

    if config.server.check_consistency_on_startup {
        match consistency::scan(metadata.as_ref(), storage.as_ref()).await {
            Ok(report) => report.log(),
            Err(e) => tracing::warn!(error = %e, "Consistency scan failed"),
        }
    }

    // Create application state
    let state = AppState::new(config.clone(), storage, metadata);

    // Create router
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;

    tracing::info!(base_url = %config.server.base_url(), "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
