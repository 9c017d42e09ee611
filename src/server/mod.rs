//! HTTP service exposing the voice model.
//!
//! Routes:
//! - `GET /health`
//! - `GET /config`
//! - `POST /generate` (multipart: `audio` file, `text` field)

mod error;
mod handlers;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{ATTACHMENT_NAME, AppState, ConfigResponse, HealthResponse};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::engine::VoiceCloner;
use crate::model::VoiceModel;

/// Default cap on request bodies.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Largest accepted request body in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Build the router.
pub fn create_router<M: VoiceModel + 'static>(state: AppState<M>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health::<M>))
        .route("/config", get(handlers::config::<M>))
        .route("/generate", post(handlers::generate::<M>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until SIGINT or SIGTERM.
///
/// The model must already be loaded; nothing is bound before that.
pub async fn run<M: VoiceModel + 'static>(
    config: &ServerConfig,
    cloner: Arc<VoiceCloner<M>>,
) -> std::io::Result<()> {
    let app = create_router(AppState::new(cloner), config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}
