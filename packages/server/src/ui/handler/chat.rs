//! Chat endpoint handlers (plaintext bodies).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
};

use crate::ui::{
    codec::{decode_join_room, decode_post_message, decode_room_name, encode_names, read_body},
    error::ApiError,
    state::AppState,
};

/// POST /user/add — body: `<username>`
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = read_body(body)?;
    let user = state.chat_service.register_user(&body).await?;

    tracing::info!("user added: {}", user);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users
pub async fn list_users(State(state): State<Arc<AppState>>) -> String {
    encode_names(&state.chat_service.list_users().await)
}

/// POST /room/add — body: `<roomname>`
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = read_body(body)?;
    let room = state.chat_service.create_room(&body).await?;

    tracing::info!("room added: {}", room);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /room/user/add — body: `<roomname>,<username>`
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = read_body(body)?;
    let (room, user) = decode_join_room(&body)?;
    state.chat_service.join_room(room, user).await?;

    tracing::info!("user {:?} added to room {:?}", user, room);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /room/names
pub async fn list_room_names(State(state): State<Arc<AppState>>) -> String {
    encode_names(&state.chat_service.list_room_names().await)
}

/// GET /room/users — body: `<roomname>`
pub async fn list_room_users(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<String, ApiError> {
    let body = read_body(body)?;
    let members = state.chat_service.list_room_users(&body).await?;
    Ok(encode_names(&members))
}

/// POST /room/message/add — body: `<roomname>,<username>,<text>`
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let body = read_body(body)?;
    let (room, user, text) = decode_post_message(&body)?;
    let message = state.chat_service.post_message(room, user, text).await?;

    tracing::info!(
        "message {:?} from {:?} added to room {:?}",
        message.text.as_str(),
        user,
        room
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /room/messages — body: `<roomname>`
pub async fn room_messages(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<String, ApiError> {
    let body = read_body(body)?;
    let room = decode_room_name(&body)?;
    Ok(state.chat_service.room_transcript(room).await?)
}
