//! エンティティ
//!
//! Room は自身のメンバー集合とメッセージ履歴を所有します。
//! 並行アクセス時の排他は Room ごとの Mutex（[`SharedRoom`]）が担い、
//! 異なる Room への操作が互いをブロックすることはありません。

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{
    error::RoomError,
    value_object::{MessageText, RoomName, Timestamp, UserName},
};

/// Room Registry が払い出す Room への参照（Room ごとに独立したロックを持つ）
pub type SharedRoom = Arc<Mutex<Room>>;

/// 登録済みユーザー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: UserName,
    pub registered_at: Timestamp,
}

impl User {
    pub fn new(name: UserName, registered_at: Timestamp) -> Self {
        Self {
            name,
            registered_at,
        }
    }
}

/// Room に追加されたメッセージ（追加後は不変）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub timestamp: Timestamp,
    pub author: UserName,
    pub text: MessageText,
}

impl ChatMessage {
    pub fn new(author: UserName, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            author,
            text,
        }
    }
}

/// チャットルーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub created_at: Timestamp,
    /// 参加順のメンバー（重複なし）。User Registry のエントリを名前で参照する
    members: Vec<UserName>,
    /// 追加順のメッセージ履歴（追記のみ）
    messages: Vec<ChatMessage>,
}

impl Room {
    /// 空の Room を作成
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            name,
            created_at,
            members: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// メンバーを追加
    ///
    /// ユーザーがグローバルに存在するかの検証は呼び出し側（ChatService）の責務。
    pub fn add_member(&mut self, user: UserName) -> Result<(), RoomError> {
        if self.is_member(&user) {
            return Err(RoomError::AlreadyMember {
                room: self.name.to_string(),
                user: user.to_string(),
            });
        }
        self.members.push(user);
        Ok(())
    }

    pub fn is_member(&self, user: &UserName) -> bool {
        self.members.contains(user)
    }

    /// メンバー名のスナップショット（参加順）
    pub fn member_names(&self) -> Vec<UserName> {
        self.members.clone()
    }

    /// メッセージを履歴の末尾に追加し、保存されたメッセージを返す
    pub fn append_message(
        &mut self,
        author: UserName,
        text: MessageText,
        timestamp: Timestamp,
    ) -> ChatMessage {
        let message = ChatMessage::new(author, text, timestamp);
        self.messages.push(message.clone());
        message
    }

    /// 追加順のメッセージ履歴
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}
