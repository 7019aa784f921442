//! Server lifecycle: bind the configured address and serve the API router
//! until the process is stopped.

use std::sync::Arc;

use crate::api::router::api_router;
use crate::config::AppConfig;
use crate::orchestrator::Orchestrator;

/// Errors from server startup.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Bind and serve. Runs until the task is cancelled or the listener fails.
pub async fn serve(config: &AppConfig, orchestrator: Arc<Orchestrator>) -> Result<(), ServeError> {
    let router = api_router(orchestrator);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: config.bind_addr,
            source,
        })?;

    let local_addr = listener.local_addr().map_err(ServeError::Serve)?;
    tracing::info!(addr = %local_addr, "API server listening");

    axum::serve(listener, router)
        .await
        .map_err(ServeError::Serve)
}
