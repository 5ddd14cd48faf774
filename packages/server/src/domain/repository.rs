//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! どちらの Registry も内部に排他機構を持ち、並行する登録・参照・一覧取得が
//! 壊れたマップを観測することはありません。

use async_trait::async_trait;

use super::{RepositoryError, RoomName, SharedRoom, Timestamp, User, UserName};

/// User Registry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを登録（同名のユーザーが存在する場合は UserAlreadyExists）
    async fn register(
        &self,
        name: UserName,
        registered_at: Timestamp,
    ) -> Result<User, RepositoryError>;

    /// ユーザーが存在するか
    async fn exists(&self, name: &UserName) -> bool;

    /// 登録済みユーザー名のスナップショット（名前順）
    async fn list_all(&self) -> Vec<UserName>;
}

/// Room Registry
///
/// Room の内部には立ち入らず、[`SharedRoom`] を払い出すだけに留めます。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 空の Room を作成（同名の Room が存在する場合は RoomAlreadyExists）
    async fn create(&self, name: RoomName, created_at: Timestamp) -> Result<(), RepositoryError>;

    /// Room を取得
    async fn get(&self, name: &RoomName) -> Result<SharedRoom, RepositoryError>;

    /// Room が存在するか
    async fn exists(&self, name: &RoomName) -> bool;

    /// Room 名のスナップショット（名前順）
    async fn list_names(&self) -> Vec<RoomName>;

    /// Room 数
    async fn count(&self) -> usize;
}
