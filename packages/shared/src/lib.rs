//! Shared utilities for the Agora chat server and client.

pub mod logger;
pub mod time;
