//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::{
    handler::{get_online_users, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket path clients connect to
pub const SOCKET_PATH: &str = "/api/socket";

/// relaychat HTTP/WebSocket server
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(registry, message_pusher, &config);
/// Server::new(state, config).run().await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl Server {
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
        }
    }

    /// Build the router without binding a socket
    pub fn into_router(self) -> Router {
        Router::new()
            // WebSocket endpoint
            .route(SOCKET_PATH, get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/users", get(get_online_users))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state)
    }

    /// Bind to the configured address and serve until a shutdown signal
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address
    /// or if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let max_file_bytes = self.config.max_file_bytes;
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("relaychat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}{}", bind_addr, SOCKET_PATH);
        tracing::info!("File payloads capped at {} bytes", max_file_bytes);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.into_router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
