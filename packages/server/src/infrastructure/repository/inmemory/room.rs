//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 排他の粒度
//!
//! ```text
//! RwLock<HashMap<RoomName, Arc<Mutex<Room>>>>
//!   └─ マップ全体のロック: 作成・取得・一覧
//!        └─ Room ごとのロック: メンバー追加・メッセージ追加・各種一覧
//! ```
//!
//! マップのロックは Room を払い出した時点で解放されるため、
//! ある Room への書き込みが他の Room や Registry をブロックすることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{RepositoryError, Room, RoomName, RoomRepository, SharedRoom, Timestamp};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// ルーム名 → Room
    rooms: RwLock<HashMap<RoomName, SharedRoom>>,
}

impl InMemoryRoomRepository {
    /// 空の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, name: RoomName, created_at: Timestamp) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&name) {
            return Err(RepositoryError::RoomAlreadyExists(name.to_string()));
        }
        let room = Arc::new(Mutex::new(Room::new(name.clone(), created_at)));
        rooms.insert(name, room);
        Ok(())
    }

    async fn get(&self, name: &RoomName) -> Result<SharedRoom, RepositoryError> {
        self.rooms
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(name.to_string()))
    }

    async fn exists(&self, name: &RoomName) -> bool {
        self.rooms.read().await.contains_key(name)
    }

    async fn list_names(&self) -> Vec<RoomName> {
        let rooms = self.rooms.read().await;
        let mut names: Vec<RoomName> = rooms.keys().cloned().collect();
        names.sort();
        names
    }

    async fn count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
