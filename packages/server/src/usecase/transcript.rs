//! Transcript rendering.

use agora_shared::time::timestamp_to_jst_kitchen;

use crate::domain::{ChatMessage, RoomName};

/// Render one message as `<time> <author>: <text>`, author right-aligned to 20 columns.
fn format_message_line(message: &ChatMessage) -> String {
    format!(
        "{} {:>20}: {}",
        timestamp_to_jst_kitchen(message.timestamp.value()),
        message.author.as_str(),
        message.text.as_str()
    )
}

/// Render a room's messages in append order, preceded by a header line.
pub fn format_transcript(room: &RoomName, messages: &[ChatMessage]) -> String {
    let lines: Vec<String> = messages.iter().map(format_message_line).collect();
    format!(
        "room {:?} has {} messages:\n{}",
        room.as_str(),
        messages.len(),
        lines.join("\n")
    )
}
