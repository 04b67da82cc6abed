mod config;
mod errors;
mod export;
mod forms;
mod layout;
mod models;
mod persistence;
mod render;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::export::HtmlFileExporter;
use crate::persistence::{FileStorage, LoadOutcome, MemoryStorage, RedisStorage, StateStorage};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::CvStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV builder v{}", env!("CARGO_PKG_VERSION"));

    // Open the storage backend and restore the last document
    let storage = open_storage(&config)?;
    info!("Storage backend: {}", storage.name());

    let store = tokio::task::spawn_blocking(move || CvStore::new(storage)).await?;
    match store.load_outcome() {
        LoadOutcome::Fresh => info!("No saved CV, starting from defaults"),
        LoadOutcome::Restored => info!("Saved CV restored"),
        LoadOutcome::Migrated { from } => info!("Saved CV migrated from version {from}"),
        LoadOutcome::Discarded { reason } => warn!("Saved CV discarded: {reason}"),
    }

    // Saves every published snapshot in the background
    let writer = store.spawn_persistence();

    let exporter = Arc::new(HtmlFileExporter::new(config.export_dir.clone()));
    info!("Exports go to {}", exporter.dir().display());

    // Build app state
    let state = AppState::new(store, exporter);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the editor has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the store; once it is gone the writer flushes and exits.
    match tokio::time::timeout(FLUSH_TIMEOUT, writer).await {
        Ok(Ok(())) => info!("Shutdown complete"),
        Ok(Err(e)) => warn!("Persistence writer failed: {e}"),
        Err(_) => warn!("Persistence writer still busy after {FLUSH_TIMEOUT:?}, exiting"),
    }

    Ok(())
}

/// How long shutdown waits for the last snapshot to reach storage.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl+C handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

fn open_storage(config: &Config) -> Result<Arc<dyn StateStorage>> {
    Ok(match &config.storage {
        StorageBackend::File => Arc::new(FileStorage::new(config.storage_dir.clone())?),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::Redis { url } => Arc::new(RedisStorage::new(url, "cv-builder")?),
    })
}
