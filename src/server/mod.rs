//! HTTP surface for the triage engine

use crate::config::Config;
use crate::engine::SymptomChecker;
use crate::error::{Result, TriageError};
use analytics::Analytics;
use std::sync::Arc;
use tokio::sync::Mutex;

// Submodules
pub mod analytics;
pub mod handlers;
pub mod router;

pub use router::build_router;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<SymptomChecker>,
    pub config: Arc<Config>,
    pub analytics: Arc<Mutex<Analytics>>,
}

impl AppState {
    pub fn new(checker: SymptomChecker, config: Config) -> Self {
        Self {
            checker: Arc::new(checker),
            config: Arc::new(config),
            analytics: Arc::new(Mutex::new(Analytics::new(chrono::Utc::now().date_naive()))),
        }
    }
}

/// Bind and serve until Ctrl-C
pub async fn start_http_server(state: AppState) -> Result<()> {
    let addr = state.config.http.socket_addr()?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener on {}: {}", addr, e))?;

    tracing::info!("Starting HTTP server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TriageError::Internal {
            message: format!("HTTP server error: {e}"),
        })?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
