//! Server state.

use std::sync::Arc;

use crate::usecase::ChatService;

/// Shared application state
pub struct AppState {
    /// ChatService（Registry を束ねる Facade）
    pub chat_service: Arc<ChatService>,
}
