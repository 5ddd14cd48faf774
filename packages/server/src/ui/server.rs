//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::ChatService;

use super::{
    handler::{
        create_room, debug_room_state, health_check, join_room, list_room_names, list_room_users,
        list_users, post_message, register_user, room_messages,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Multi-room chat HTTP server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(chat_service);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ChatService（Registry を束ねる Facade）
    chat_service: Arc<ChatService>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            chat_service: self.chat_service.clone(),
        });

        Router::new()
            // チャット エンドポイント（プレーンテキスト）
            .route("/users", get(list_users))
            .route("/user/add", post(register_user))
            .route("/room/add", post(create_room))
            .route("/room/user/add", post(join_room))
            .route("/room/names", get(list_room_names))
            .route("/room/users", get(list_room_users))
            .route("/room/message/add", post(post_message))
            .route("/room/messages", get(room_messages))
            // HTTP エンドポイント（JSON）
            .route("/api/health", get(health_check))
            .route("/debug/rooms/{room_name}", get(debug_room_state))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let app = self.router();

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Post policy: {}", self.chat_service.post_policy());
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Run the chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> std::io::Result<()> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }
}
