//! Repository implementations.

mod inmemory;

pub use inmemory::{InMemoryRoomRepository, InMemoryUserRepository};
