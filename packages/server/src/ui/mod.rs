//! HTTP dispatch layer.
//!
//! Decodes plaintext comma-delimited request bodies, calls one
//! [`ChatService`](crate::usecase::ChatService) operation and encodes the result.

pub mod codec;
mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use error::ApiError;
pub use server::Server;
