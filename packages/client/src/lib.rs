//! HTTP client for the Agora chat server.
//!
//! Speaks the server's plaintext encoding: comma-delimited request bodies and
//! comma-joined list responses.

mod client;
mod error;

pub use client::ChatClient;
pub use error::ClientError;
