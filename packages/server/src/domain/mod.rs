//! Domain layer: value objects, entities, repository traits and errors.

mod entity;
mod error;
mod repository;
mod value_object;

pub use entity::{ChatMessage, Room, SharedRoom, User};
pub use error::{RepositoryError, RoomError, ValueObjectError};
pub use repository::{RoomRepository, UserRepository};
pub use value_object::{MessageText, RoomName, Timestamp, UserName};

#[cfg(test)]
pub use repository::{MockRoomRepository, MockUserRepository};
