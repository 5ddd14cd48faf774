//! HTTP API response DTOs.

use serde::Serialize;

use agora_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{ChatMessage, Room};

/// Message as rendered in the room state endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDto {
    pub author: String,
    pub text: String,
    /// RFC 3339 format in JST
    pub sent_at: String,
}

/// Room state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub members: Vec<String>,
    pub messages: Vec<MessageDto>,
    /// RFC 3339 format in JST
    pub created_at: String,
}

impl From<&ChatMessage> for MessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            author: message.author.to_string(),
            text: message.text.as_str().to_string(),
            sent_at: timestamp_to_jst_rfc3339(message.timestamp.value()),
        }
    }
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.to_string(),
            members: room
                .member_names()
                .iter()
                .map(|name| name.to_string())
                .collect(),
            messages: room.messages().iter().map(MessageDto::from).collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
        }
    }
}
