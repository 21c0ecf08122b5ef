//! HTTP API consumed by the readiness dashboard

pub mod error;
pub mod handlers;

use crate::error::Result;
use crate::service::ReadinessService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReadinessService>,
}

impl AppState {
    pub fn new(service: ReadinessService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/methods", get(handlers::get_methods))
        .route("/api/logUserProgress", post(handlers::log_user_progress))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(bind: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
