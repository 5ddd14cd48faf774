//! InMemory User Repository 実装
//!
//! ドメイン層が定義する UserRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用し、RwLock で登録・参照・一覧を排他します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{RepositoryError, Timestamp, User, UserName, UserRepository};

/// インメモリ User Repository 実装
#[derive(Default)]
pub struct InMemoryUserRepository {
    /// ユーザー名 → User
    users: RwLock<HashMap<UserName, User>>,
}

impl InMemoryUserRepository {
    /// 空の InMemoryUserRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn register(
        &self,
        name: UserName,
        registered_at: Timestamp,
    ) -> Result<User, RepositoryError> {
        // 存在確認と挿入は同じ書き込みロックの中で行う
        let mut users = self.users.write().await;
        if users.contains_key(&name) {
            return Err(RepositoryError::UserAlreadyExists(name.to_string()));
        }
        let user = User::new(name.clone(), registered_at);
        users.insert(name, user.clone());
        Ok(user)
    }

    async fn exists(&self, name: &UserName) -> bool {
        self.users.read().await.contains_key(name)
    }

    async fn list_all(&self) -> Vec<UserName> {
        let users = self.users.read().await;
        let mut names: Vec<UserName> = users.keys().cloned().collect();
        // Sort by name for consistent ordering
        names.sort();
        names
    }
}
