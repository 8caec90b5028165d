//! HTTP service
//!
//! Exposes the check pipeline as a JSON API:
//! - `POST /api/check` runs one (possibly resumed) check step
//! - `POST /api/link-details` finds a link's anchors on a page
//! - `GET /health` is a liveness probe

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::LinkDetailsRequest;

use crate::check::Checker;
use crate::config::Config;
use crate::{ConfigError, SweepError};
use axum::routing::{get, post};
use axum::Router;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub checker: Arc<Checker>,
}

impl AppState {
    pub fn new(checker: Checker) -> Self {
        Self {
            checker: Arc::new(checker),
        }
    }
}

/// Builds the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/check", post(handlers::check))
        .route("/api/link-details", post(handlers::link_details))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C
pub async fn serve(config: &Config) -> Result<(), SweepError> {
    let ip: IpAddr = config.server.bind_address.parse().map_err(|e| {
        ConfigError::Validation(format!(
            "invalid bind-address {:?}: {}",
            config.server.bind_address, e
        ))
    })?;
    let addr = SocketAddr::new(ip, config.server.port);

    let state = AppState::new(Checker::new(config)?);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Link-Sweep listening on http://{}", listener.local_addr()?);

    serve_on(listener, state).await
}

/// Serves on an already bound listener until Ctrl-C
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<(), SweepError> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, finishing in-flight requests"),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
