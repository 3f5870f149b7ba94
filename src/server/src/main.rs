//! texfetch - TeX engine file server.
//!
//! Resolves XeTeX/pdfTeX file requests through kpathsea (or a configured
//! directory list) and serves them over HTTP with two-tier caching.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use texfetch_runtime::LookupService;
use texfetch_server::{router, Args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.into_config()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_directive())),
        )
        .init();

    tracing::info!(
        bind = %config.bind,
        caching = config.cache.enabled,
        byte_cache_capacity = config.cache.byte_cache_capacity,
        resolver = ?config.resolver.backend,
        preamble_dir = %config.resolver.preamble_dir.display(),
        "Starting texfetch"
    );

    let lookup = Arc::new(
        LookupService::from_config(&config)
            .map_err(|e| format!("Failed to initialize lookup service: {}", e))?,
    );

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "texfetch listening");

    axum::serve(listener, router(Arc::clone(&lookup)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    lookup.log_stats();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
