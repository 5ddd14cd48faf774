//! HTTP handlers.

mod chat;
mod http;

pub use chat::{
    create_room, join_room, list_room_names, list_room_users, list_users, post_message,
    register_user, room_messages,
};
pub use http::{debug_room_state, health_check};
