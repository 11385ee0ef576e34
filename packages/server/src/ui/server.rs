//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{domain::ChatRepository, infrastructure::message_pusher::ConnectionManager};

use super::{
    handler::{debug_connections, get_online_members, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Tujifund chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(repository, Arc::new(ConnectionManager::new()));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        connection_manager: Arc<ConnectionManager>,
    ) -> Self {
        Self {
            app_state: Arc::new(AppState::new(repository, connection_manager)),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.app_state.clone())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Tujifund chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Routes of the chat server, with request tracing.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/chamas/{chama_id}/online", get(get_online_members))
        .route("/debug/connections", get(debug_connections))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
