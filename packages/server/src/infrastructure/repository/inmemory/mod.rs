//! InMemory Repository 実装

mod room;
mod user;

pub use room::InMemoryRoomRepository;
pub use user::InMemoryUserRepository;
