//! UseCase: チャマのオンラインメンバー取得

use std::sync::Arc;

use crate::domain::{ChamaId, MessagePusher, UserId};

/// オンラインメンバー取得のユースケース
pub struct GetOnlineMembersUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetOnlineMembersUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// ライブルームに参加中のユーザー ID（昇順、重複なし）
    pub async fn execute(&self, chama_id: ChamaId) -> Vec<UserId> {
        self.message_pusher.online_members(chama_id).await
    }
}
