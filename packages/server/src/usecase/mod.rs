//! UseCase layer: the chat service facade over both registries.

mod chat_service;
mod error;
mod policy;
mod transcript;

pub use chat_service::ChatService;
pub use error::ChatServiceError;
pub use policy::PostPolicy;
pub use transcript::format_transcript;
