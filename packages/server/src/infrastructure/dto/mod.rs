//! Data Transfer Objects (DTOs) for the chat server.
//!
//! - `http`: JSON response DTOs of the debug endpoints

pub mod http;
