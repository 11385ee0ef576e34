//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。メッセージ ID は 1 から連番で採番し、
//! 送信時刻は注入された `Clock` から取得します。

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tujifund_shared::time::{Clock, SystemClock};

use crate::{
    domain::{
        Chama, ChamaId, ChamaMember, ChatMessage, ChatRepository, MessageId, NewMessage,
        RepositoryError, User, UserId,
    },
    infrastructure::repository::seed::{SeedData, SeedError},
};

#[derive(Debug, Default)]
struct Store {
    users: HashMap<UserId, User>,
    chamas: HashMap<ChamaId, Chama>,
    members: HashMap<(ChamaId, UserId), ChamaMember>,
    messages: BTreeMap<MessageId, ChatMessage>,
    last_message_id: i64,
}

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl InMemoryChatRepository {
    /// 新しい空の InMemoryChatRepository を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            clock,
        }
    }

    /// シードデータを読み込んだ InMemoryChatRepository を作成
    pub async fn from_seed(seed: SeedData, clock: Arc<dyn Clock>) -> Result<Self, SeedError> {
        let repository = Self::new(clock);
        for user in seed.users {
            repository.insert_user(user).await;
        }
        for chama in seed.chamas {
            repository.insert_chama(chama).await;
        }
        for member in seed.members {
            repository.insert_member(member).await?;
        }
        Ok(repository)
    }

    pub async fn insert_user(&self, user: User) {
        let mut store = self.store.lock().await;
        store.users.insert(user.id, user);
    }

    pub async fn insert_chama(&self, chama: Chama) {
        let mut store = self.store.lock().await;
        store.chamas.insert(chama.id, chama);
    }

    /// メンバーシップを追加（ユーザーとチャマが存在する必要がある）
    pub async fn insert_member(&self, member: ChamaMember) -> Result<(), SeedError> {
        let mut store = self.store.lock().await;
        if !store.users.contains_key(&member.user_id) {
            return Err(SeedError::UnknownUser(member.user_id.value()));
        }
        if !store.chamas.contains_key(&member.chama_id) {
            return Err(SeedError::UnknownChama(member.chama_id.value()));
        }
        store
            .members
            .insert((member.chama_id, member.user_id), member);
        Ok(())
    }

    /// メンバーシップを削除
    pub async fn remove_member(&self, chama_id: ChamaId, user_id: UserId) -> Option<ChamaMember> {
        let mut store = self.store.lock().await;
        store.members.remove(&(chama_id, user_id))
    }

    /// 保存済みのメッセージを ID 順に取得
    pub async fn messages(&self) -> Vec<ChatMessage> {
        let store = self.store.lock().await;
        store.messages.values().cloned().collect()
    }

    pub async fn count_users(&self) -> usize {
        self.store.lock().await.users.len()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn get_chama(&self, id: ChamaId) -> Result<Option<Chama>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.chamas.get(&id).cloned())
    }

    async fn get_chama_member(
        &self,
        chama_id: ChamaId,
        user_id: UserId,
    ) -> Result<Option<ChamaMember>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.members.get(&(chama_id, user_id)).cloned())
    }

    async fn create_message(&self, message: NewMessage) -> Result<ChatMessage, RepositoryError> {
        let sent_at = self.clock.now_millis();
        let mut store = self.store.lock().await;
        store.last_message_id += 1;
        let created = ChatMessage {
            id: MessageId::new(store.last_message_id),
            sender_id: message.sender_id,
            recipient: message.recipient,
            content: message.content,
            item_id: message.item_id,
            is_read: false,
            sent_at,
        };
        store.messages.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_message(&self, id: MessageId) -> Result<Option<ChatMessage>, RepositoryError> {
        let store = self.store.lock().await;
        Ok(store.messages.get(&id).cloned())
    }

    async fn mark_message_read(&self, id: MessageId) -> Result<bool, RepositoryError> {
        let mut store = self.store.lock().await;
        let message = store
            .messages
            .get_mut(&id)
            .ok_or(RepositoryError::MessageNotFound(id.value()))?;
        let flipped = !message.is_read;
        message.is_read = true;
        Ok(flipped)
    }
}
