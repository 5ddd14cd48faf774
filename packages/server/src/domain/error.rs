//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// 空文字列は識別子として使えない
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Room エンティティ操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("user {user} already in room {room}")]
    AlreadyMember { room: String, user: String },
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),

    #[error("room already exists: {0}")]
    RoomAlreadyExists(String),

    #[error("room does not exist: {0}")]
    RoomNotFound(String),
}
