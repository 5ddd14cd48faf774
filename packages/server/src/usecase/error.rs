//! UseCase 層のエラー定義
//!
//! いずれもローカルかつ同期的な結果であり、リトライ対象ではありません。

use thiserror::Error;

use crate::domain::{RepositoryError, RoomError, ValueObjectError};

/// ChatService の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatServiceError {
    /// 空、または不正な識別子
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    #[error("room already exists: {0}")]
    RoomAlreadyExists(String),

    #[error("user does not exist: {0}")]
    UserNotFound(String),

    #[error("room does not exist: {0}")]
    RoomNotFound(String),

    #[error("user {user} already in room {room}")]
    AlreadyMember { room: String, user: String },

    /// 投稿ポリシーが MembersOnly のときに非メンバーが投稿した
    #[error("user {user} is not a member of room {room}")]
    NotMember { room: String, user: String },
}

impl From<ValueObjectError> for ChatServiceError {
    fn from(err: ValueObjectError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<RepositoryError> for ChatServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UserAlreadyExists(name) => Self::UserAlreadyExists(name),
            RepositoryError::RoomAlreadyExists(name) => Self::RoomAlreadyExists(name),
            RepositoryError::RoomNotFound(name) => Self::RoomNotFound(name),
        }
    }
}

impl From<RoomError> for ChatServiceError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::AlreadyMember { room, user } => Self::AlreadyMember { room, user },
        }
    }
}
