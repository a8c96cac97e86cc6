//! Catalog lookup server
//!
//! This module keeps the catalog and its keyword index loaded in memory and
//! answers autocomplete queries over HTTP.
//!
//! Architecture:
//! - [`CatalogService`]: owns the live generation, serializes reloads
//! - [`http`]: axum routes translating requests into service calls
//! - [`protocol`]: JSON bodies

pub mod http;
pub mod protocol;
pub mod service;

pub use http::{router, AppState};
pub use service::{CatalogService, Generation, ReloadReport, SearchOutcome};

use crate::utils::config::ServiceConfig;
use anyhow::{Context, Result};

/// Load the catalog and serve HTTP until Ctrl-C or SIGTERM
///
/// The initial load must succeed; there is no degraded mode with an empty
/// catalog.
pub fn run(config: &ServiceConfig) -> Result<()> {
    let service = CatalogService::new(&config.source, config.cache_size);
    service
        .reload()
        .with_context(|| format!("Failed to load catalog from {}", config.source.display()))?;

    let state = AppState {
        service,
        min_term_len: config.min_term_len,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build server runtime")?;

    let bind_addr = config.bind;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("Failed to bind to {}", bind_addr))?;
        tracing::info!(addr = %listener.local_addr()?, "server listening");

        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server failed")?;

        tracing::info!("server exited cleanly");
        Ok::<(), anyhow::Error>(())
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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

    tracing::info!("shutting down server");
}
