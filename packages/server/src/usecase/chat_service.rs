//! UseCase: チャットサービス（Facade）
//!
//! User Registry と Room Registry を組み合わせ、リクエスト処理層が呼び出す
//! 操作を提供します。Registry をまたぐ不変条件（参加前にユーザーが
//! 存在すること等）はここで検証します。
//!
//! 検証はすべて変更操作より前に行うため、失敗時に部分的な変更は残りません。
//! ChatService 自身は I/O を行いません。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 各操作の正常系・異常系
//! - join_room のチェック順序（ユーザー → ルーム）
//! - 投稿ポリシーごとの投稿可否
//! - 同一ルームへの並行投稿で取りこぼし・重複が起きないこと

use std::sync::Arc;

use agora_shared::time::Clock;

use crate::domain::{
    ChatMessage, MessageText, Room, RoomName, RoomRepository, SharedRoom, Timestamp, UserName,
    UserRepository,
};

use super::{error::ChatServiceError, policy::PostPolicy, transcript::format_transcript};

/// チャットサービス
pub struct ChatService {
    /// User Registry
    users: Arc<dyn UserRepository>,
    /// Room Registry
    rooms: Arc<dyn RoomRepository>,
    /// メッセージ・登録時刻の打刻に使う時計
    clock: Arc<dyn Clock>,
    post_policy: PostPolicy,
}

impl ChatService {
    /// 新しい ChatService を作成（投稿ポリシーは Open）
    pub fn new(
        users: Arc<dyn UserRepository>,
        rooms: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            rooms,
            clock,
            post_policy: PostPolicy::default(),
        }
    }

    pub fn with_post_policy(mut self, post_policy: PostPolicy) -> Self {
        self.post_policy = post_policy;
        self
    }

    pub fn post_policy(&self) -> PostPolicy {
        self.post_policy
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_jst_millis())
    }

    /// ユーザーを登録
    pub async fn register_user(&self, name: &str) -> Result<UserName, ChatServiceError> {
        let name = UserName::new(name.to_string())?;
        let user = self.users.register(name, self.now()).await?;
        tracing::debug!("user registered: {}", user.name);
        Ok(user.name)
    }

    /// Room を作成
    pub async fn create_room(&self, name: &str) -> Result<RoomName, ChatServiceError> {
        let name = RoomName::new(name.to_string())?;
        self.rooms.create(name.clone(), self.now()).await?;
        tracing::debug!(
            "room created: {}, total rooms: {}",
            name,
            self.rooms.count().await
        );
        Ok(name)
    }

    /// 登録済みユーザーを名前で引く（空の名前は登録され得ないので UserNotFound）
    async fn find_user(&self, name: &str) -> Result<UserName, ChatServiceError> {
        let not_found = || ChatServiceError::UserNotFound(name.to_string());
        let user = UserName::new(name.to_string()).map_err(|_| not_found())?;
        if !self.users.exists(&user).await {
            return Err(not_found());
        }
        Ok(user)
    }

    /// Room を名前で引く（空の名前は作成され得ないので RoomNotFound）
    async fn find_room(&self, name: &str) -> Result<(RoomName, SharedRoom), ChatServiceError> {
        let room_name = RoomName::new(name.to_string())
            .map_err(|_| ChatServiceError::RoomNotFound(name.to_string()))?;
        let room = self.rooms.get(&room_name).await?;
        Ok((room_name, room))
    }

    /// ユーザーを Room に参加させる
    ///
    /// ユーザーの存在確認をルームの存在確認より先に行うため、
    /// 両方とも存在しない場合は `UserNotFound` が返ります。
    pub async fn join_room(
        &self,
        room_name: &str,
        user_name: &str,
    ) -> Result<(), ChatServiceError> {
        let user_name = self.find_user(user_name).await?;
        let (room_name, room) = self.find_room(room_name).await?;
        room.lock().await.add_member(user_name.clone())?;

        tracing::debug!("user {} joined room {}", user_name, room_name);
        Ok(())
    }

    /// Room にメッセージを投稿
    ///
    /// ルームの存在確認が最初に行われ、その後に投稿者を検証します。
    /// 投稿者の検証は [`PostPolicy`] に従います（デフォルトは空でないことのみ）。
    pub async fn post_message(
        &self,
        room_name: &str,
        author: &str,
        text: &str,
    ) -> Result<ChatMessage, ChatServiceError> {
        let (room_name, room) = self.find_room(room_name).await?;

        let author = if self.post_policy.requires_registration() {
            self.find_user(author).await?
        } else {
            UserName::new(author.to_string())?
        };

        // メンバー確認と追記は同じロックの中で行う
        let mut room = room.lock().await;
        if self.post_policy.requires_membership() && !room.is_member(&author) {
            return Err(ChatServiceError::NotMember {
                room: room_name.to_string(),
                user: author.to_string(),
            });
        }
        let message = room.append_message(author, MessageText::new(text.to_string()), self.now());

        tracing::debug!(
            "message from {} added to room {}, total messages: {}",
            message.author,
            room_name,
            room.messages().len()
        );
        Ok(message)
    }

    /// 登録済みユーザー名の一覧
    pub async fn list_users(&self) -> Vec<UserName> {
        self.users.list_all().await
    }

    /// Room 名の一覧
    pub async fn list_room_names(&self) -> Vec<RoomName> {
        self.rooms.list_names().await
    }

    /// Room のメンバー一覧（参加順）
    pub async fn list_room_users(
        &self,
        room_name: &str,
    ) -> Result<Vec<UserName>, ChatServiceError> {
        let (_, room) = self.find_room(room_name).await?;
        let members = room.lock().await.member_names();
        Ok(members)
    }

    /// Room のメッセージ一覧（追加順のスナップショット）
    pub async fn list_room_messages(
        &self,
        room_name: &str,
    ) -> Result<Vec<ChatMessage>, ChatServiceError> {
        let (_, room) = self.find_room(room_name).await?;
        let messages = room.lock().await.messages().to_vec();
        Ok(messages)
    }

    /// Room のメッセージを表示用に整形したもの
    pub async fn room_transcript(&self, room_name: &str) -> Result<String, ChatServiceError> {
        let (room_name, room) = self.find_room(room_name).await?;
        let messages = room.lock().await.messages().to_vec();
        Ok(format_transcript(&room_name, &messages))
    }

    /// Room の状態のスナップショット（デバッグ用）
    pub async fn room_snapshot(&self, room_name: &str) -> Result<Room, ChatServiceError> {
        let (_, room) = self.find_room(room_name).await?;
        let snapshot = room.lock().await.clone();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use agora_shared::time::FixedClock;
    use futures_util::future::join_all;

    use super::*;
    use crate::{
        domain::{MockRoomRepository, MockUserRepository},
        infrastructure::repository::{InMemoryRoomRepository, InMemoryUserRepository},
    };

    const NOW: i64 = 1672498800000;

    fn create_test_service() -> ChatService {
        ChatService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(FixedClock::new(NOW)),
        )
    }

    fn names(values: &[&str]) -> Vec<UserName> {
        values
            .iter()
            .map(|v| UserName::new(v.to_string()).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_register_user_success() {
        // テスト項目: ユーザーを登録すると一覧に反映される
        // given (前提条件):
        let service = create_test_service();

        // when (操作):
        let result = service.register_user("alice").await;

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice");
        assert_eq!(service.list_users().await, names(&["alice"]));
    }

    #[tokio::test]
    async fn test_register_user_duplicate() {
        // テスト項目: 同名ユーザーの 2 回目の登録は UserAlreadyExists、一覧は変わらない
        // given (前提条件):
        let service = create_test_service();
        service.register_user("alice").await.unwrap();

        // when (操作):
        let result = service.register_user("alice").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ChatServiceError::UserAlreadyExists("alice".to_string()))
        );
        assert_eq!(service.list_users().await, names(&["alice"]));
    }

    #[tokio::test]
    async fn test_register_user_rejects_empty_name() {
        // テスト項目: 空のユーザー名は InvalidInput
        let service = create_test_service();

        let result = service.register_user("").await;

        assert!(matches!(result, Err(ChatServiceError::InvalidInput(_))));
        assert!(service.list_users().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_room_duplicate() {
        // テスト項目: createRoom("a") を 2 回行うと RoomAlreadyExists、Room "a" は 1 つだけ
        // given (前提条件):
        let service = create_test_service();
        service.create_room("a").await.unwrap();

        // when (操作):
        let result = service.create_room("a").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ChatServiceError::RoomAlreadyExists("a".to_string()))
        );
        let rooms = service.list_room_names().await;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].as_str(), "a");
    }

    #[tokio::test]
    async fn test_create_room_rejects_empty_name() {
        // テスト項目: 空のルーム名は InvalidInput
        let service = create_test_service();

        let result = service.create_room("").await;

        assert!(matches!(result, Err(ChatServiceError::InvalidInput(_))));
        assert!(service.list_room_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_join_room_scenario() {
        // テスト項目: alice 登録 → general 作成 → 参加成功 → 再参加は AlreadyMember
        // given (前提条件):
        let service = create_test_service();
        service.register_user("alice").await.unwrap();
        service.create_room("general").await.unwrap();

        // when (操作):
        let first = service.join_room("general", "alice").await;
        let second = service.join_room("general", "alice").await;

        // then (期待する結果):
        assert_eq!(first, Ok(()));
        assert_eq!(
            second,
            Err(ChatServiceError::AlreadyMember {
                room: "general".to_string(),
                user: "alice".to_string(),
            })
        );
        assert_eq!(
            service.list_room_users("general").await.unwrap(),
            names(&["alice"])
        );
    }

    #[tokio::test]
    async fn test_join_room_unknown_user_reported_first() {
        // テスト項目: 未登録ユーザーの参加は、ルームの有無に関わらず UserNotFound
        // given (前提条件):
        let service = create_test_service();
        service.create_room("general").await.unwrap();

        // when (操作):
        let existing_room = service.join_room("general", "ghost").await;
        let missing_room = service.join_room("missing", "ghost").await;

        // then (期待する結果):
        assert_eq!(
            existing_room,
            Err(ChatServiceError::UserNotFound("ghost".to_string()))
        );
        assert_eq!(
            missing_room,
            Err(ChatServiceError::UserNotFound("ghost".to_string()))
        );
        assert!(service.list_room_users("general").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_join_room_unknown_user_does_not_touch_room_registry() {
        // テスト項目: ユーザーが存在しない場合、Room Registry には一切アクセスしない
        // given (前提条件): Room Registry のモックには期待値を設定しない（呼ばれたら panic）
        let mut users = MockUserRepository::new();
        users
            .expect_exists()
            .withf(|name| name.as_str() == "ghost")
            .times(1)
            .returning(|_| false);
        let rooms = MockRoomRepository::new();
        let service = ChatService::new(
            Arc::new(users),
            Arc::new(rooms),
            Arc::new(FixedClock::new(NOW)),
        );

        // when (操作):
        let result = service.join_room("general", "ghost").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ChatServiceError::UserNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_join_room_missing_room() {
        // テスト項目: 登録済みユーザーが存在しないルームに参加すると RoomNotFound
        let service = create_test_service();
        service.register_user("alice").await.unwrap();

        let result = service.join_room("missing", "alice").await;

        assert_eq!(
            result,
            Err(ChatServiceError::RoomNotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_join_room_empty_names_keep_check_order() {
        // テスト項目: 空のルーム名でも未登録ユーザーは UserNotFound が先に返り、
        //             空のユーザー名も UserNotFound、登録済みユーザー + 空のルーム名は RoomNotFound
        // given (前提条件):
        let service = create_test_service();
        service.register_user("alice").await.unwrap();

        // when (操作):
        let unknown_user = service.join_room("", "ghost").await;
        let empty_user = service.join_room("general", "").await;
        let empty_room = service.join_room("", "alice").await;

        // then (期待する結果):
        assert_eq!(
            unknown_user,
            Err(ChatServiceError::UserNotFound("ghost".to_string()))
        );
        assert_eq!(
            empty_user,
            Err(ChatServiceError::UserNotFound(String::new()))
        );
        assert_eq!(
            empty_room,
            Err(ChatServiceError::RoomNotFound(String::new()))
        );
    }

    #[tokio::test]
    async fn test_post_message_room_checked_before_author() {
        // テスト項目: 投稿者名が空でも、存在しないルームへの投稿は RoomNotFound が先に返る
        // given (前提条件):
        let service = create_test_service();
        service.create_room("general").await.unwrap();

        // when (操作):
        let missing_room = service.post_message("missing", "", "hi").await;
        let empty_author = service.post_message("general", "", "hi").await;

        // then (期待する結果):
        assert_eq!(
            missing_room,
            Err(ChatServiceError::RoomNotFound("missing".to_string()))
        );
        assert!(matches!(
            empty_author,
            Err(ChatServiceError::InvalidInput(_))
        ));
        assert!(service.list_room_messages("general").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_membership_is_per_room() {
        // テスト項目: ある Room への参加は他の Room のメンバーに影響しない
        // given (前提条件):
        let service = create_test_service();
        service.register_user("alice").await.unwrap();
        service.create_room("a").await.unwrap();
        service.create_room("b").await.unwrap();

        // when (操作):
        service.join_room("a", "alice").await.unwrap();

        // then (期待する結果):
        assert_eq!(service.list_room_users("a").await.unwrap(), names(&["alice"]));
        assert!(service.list_room_users("b").await.unwrap().is_empty());
        assert_eq!(service.join_room("b", "alice").await, Ok(()));
    }

    #[tokio::test]
    async fn test_post_message_missing_room_records_nothing() {
        // テスト項目: 存在しないルームへの投稿は RoomNotFound、どのルームにも記録されない
        // given (前提条件):
        let service = create_test_service();
        service.register_user("alice").await.unwrap();
        service.create_room("general").await.unwrap();

        // when (操作):
        let result = service.post_message("missing", "alice", "hi").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ChatServiceError::RoomNotFound("missing".to_string()))
        );
        assert!(service.list_room_messages("general").await.unwrap().is_empty());
        assert!(!service
            .list_room_names()
            .await
            .iter()
            .any(|room| room.as_str() == "missing"));
    }

    #[tokio::test]
    async fn test_post_message_sequential_keeps_call_order() {
        // テスト項目: N 回の逐次投稿後、N 件のメッセージが投稿順で取得できる
        // given (前提条件):
        let service = create_test_service();
        service.create_room("general").await.unwrap();

        // when (操作):
        for i in 0..10 {
            service
                .post_message("general", "alice", &format!("message {i}"))
                .await
                .unwrap();
        }

        // then (期待する結果):
        let messages = service.list_room_messages("general").await.unwrap();
        assert_eq!(messages.len(), 10);
        for (i, message) in messages.iter().enumerate() {
            assert_eq!(message.text.as_str(), format!("message {i}"));
            assert_eq!(message.timestamp.value(), NOW);
        }
    }

    #[tokio::test]
    async fn test_post_message_open_policy_allows_unregistered_author() {
        // テスト項目: デフォルト（Open）では未登録・非メンバーでも投稿できる
        // given (前提条件):
        let service = create_test_service();
        service.create_room("general").await.unwrap();

        // when (操作):
        let result = service.post_message("general", "stranger", "hello").await;

        // then (期待する結果):
        let message = result.unwrap();
        assert_eq!(message.author.as_str(), "stranger");
        assert_eq!(service.post_policy(), PostPolicy::Open);
    }

    #[tokio::test]
    async fn test_post_message_registered_only_policy() {
        // テスト項目: RegisteredOnly では未登録ユーザーの投稿は UserNotFound、登録済みなら非メンバーでも可
        // given (前提条件):
        let service = create_test_service().with_post_policy(PostPolicy::RegisteredOnly);
        service.register_user("alice").await.unwrap();
        service.create_room("general").await.unwrap();

        // when (操作):
        let stranger = service.post_message("general", "stranger", "hello").await;
        let alice = service.post_message("general", "alice", "hello").await;

        // then (期待する結果):
        assert_eq!(
            stranger,
            Err(ChatServiceError::UserNotFound("stranger".to_string()))
        );
        assert!(alice.is_ok());
        assert_eq!(service.list_room_messages("general").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_post_message_members_only_policy() {
        // テスト項目: MembersOnly では非メンバーの投稿は NotMember で拒否され、記録されない
        // given (前提条件):
        let service = create_test_service().with_post_policy(PostPolicy::MembersOnly);
        service.register_user("alice").await.unwrap();
        service.register_user("bob").await.unwrap();
        service.create_room("general").await.unwrap();
        service.join_room("general", "alice").await.unwrap();

        // when (操作):
        let bob = service.post_message("general", "bob", "let me in").await;
        let alice = service.post_message("general", "alice", "hi").await;

        // then (期待する結果):
        assert_eq!(
            bob,
            Err(ChatServiceError::NotMember {
                room: "general".to_string(),
                user: "bob".to_string(),
            })
        );
        assert!(alice.is_ok());
        let messages = service.list_room_messages("general").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].author.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_list_operations_on_missing_room() {
        // テスト項目: 存在しないルームの一覧系操作は RoomNotFound
        let service = create_test_service();

        let err = ChatServiceError::RoomNotFound("missing".to_string());
        assert_eq!(service.list_room_users("missing").await, Err(err.clone()));
        assert_eq!(service.list_room_messages("missing").await, Err(err.clone()));
        assert_eq!(service.room_transcript("missing").await, Err(err));
    }

    #[tokio::test]
    async fn test_room_transcript() {
        // テスト項目: トランスクリプトにヘッダーと投稿順のメッセージが含まれる
        // given (前提条件):
        let service = create_test_service();
        service.create_room("general").await.unwrap();
        service.post_message("general", "alice", "hi").await.unwrap();
        service.post_message("general", "bob", "hey").await.unwrap();

        // when (操作):
        let transcript = service.room_transcript("general").await.unwrap();

        // then (期待する結果):
        let lines: Vec<&str> = transcript.lines().collect();
        assert_eq!(lines[0], "room \"general\" has 2 messages:");
        assert_eq!(lines[1], format!("12:00AM {}alice: hi", " ".repeat(15)));
        assert_eq!(lines[2], format!("12:00AM {}bob: hey", " ".repeat(17)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_posts_to_same_room() {
        // テスト項目: 同一ルームへの T 件の並行投稿後、T 件すべてがちょうど 1 回ずつ記録される
        // given (前提条件):
        const T: usize = 200;
        let service = Arc::new(create_test_service());
        service.create_room("general").await.unwrap();

        // when (操作):
        let tasks = (0..T).map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .post_message("general", &format!("user-{}", i % 8), &format!("message {i}"))
                    .await
            })
        });
        let results = join_all(tasks).await;

        // then (期待する結果):
        for result in results {
            result.unwrap().unwrap();
        }
        let messages = service.list_room_messages("general").await.unwrap();
        assert_eq!(messages.len(), T);
        let texts: HashSet<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts.len(), T);
        for i in 0..T {
            assert!(texts.contains(format!("message {i}").as_str()));
        }
        for message in &messages {
            // 投稿者と本文の組み合わせが崩れていない
            let i: usize = message.text.as_str()["message ".len()..].parse().unwrap();
            assert_eq!(message.author.as_str(), format!("user-{}", i % 8));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_operations_across_rooms() {
        // テスト項目: 複数ルームへの並行参加・投稿で、各ルームの状態が混ざらない
        // given (前提条件):
        let service = Arc::new(create_test_service());
        for user in ["alice", "bob", "charlie", "dave"] {
            service.register_user(user).await.unwrap();
        }
        for room in ["a", "b", "c"] {
            service.create_room(room).await.unwrap();
        }

        // when (操作):
        let mut tasks = Vec::new();
        for room in ["a", "b", "c"] {
            for user in ["alice", "bob", "charlie", "dave"] {
                let service = service.clone();
                tasks.push(tokio::spawn(async move {
                    service.join_room(room, user).await?;
                    service.post_message(room, user, room).await.map(|_| ())
                }));
            }
        }
        for result in join_all(tasks).await {
            result.unwrap().unwrap();
        }

        // then (期待する結果):
        for room in ["a", "b", "c"] {
            let mut members = service.list_room_users(room).await.unwrap();
            members.sort();
            assert_eq!(members, names(&["alice", "bob", "charlie", "dave"]));
            let messages = service.list_room_messages(room).await.unwrap();
            assert_eq!(messages.len(), 4);
            assert!(messages.iter().all(|m| m.text.as_str() == room));
        }
    }
}
