//! HTTP API endpoint handlers (JSON).

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::RoomDetailDto, ui::state::AppState, usecase::ChatServiceError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint to get the current state of one room
pub async fn debug_room_state(
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.chat_service.room_snapshot(&room_name).await {
        // Domain Model から DTO への変換
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(ChatServiceError::RoomNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!("Failed to get room state for {:?}: {}", room_name, e);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}
