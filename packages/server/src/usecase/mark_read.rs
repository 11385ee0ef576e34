//! UseCase: 既読処理
//!
//! 既読にできるのはダイレクトメッセージの受信者、またはチャマメッセージの
//! 場合はそのチャマの現在のメンバー（毎回ストレージから取得し直す）のみ。
//! 既読化に成功すると、元の送信者が接続中なら `message_read` を通知する。
//!
//! ### どのような状況を想定しているか
//! - 正常系：受信者による既読と送信者への通知
//! - 異常系：存在しないメッセージ、権限のないユーザー
//! - エッジケース：既読済みメッセージの再既読（成功、再通知なし）

use std::sync::Arc;

use crate::domain::{
    AuthenticatedSession, ChatMessage, ChatRepository, MessageId, MessagePushError,
    MessagePusher, Recipient, ServerEvent,
};

use super::error::ChatError;

/// 既読のユースケース
pub struct MarkReadUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl MarkReadUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 既読を実行
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 既読化成功（既読済みの場合も成功）
    /// * `Err(ChatError)` - `MessageNotFound` / `NotAuthorizedToMarkRead`
    pub async fn execute(
        &self,
        session: &AuthenticatedSession,
        message_id: MessageId,
    ) -> Result<(), ChatError> {
        let message = self
            .repository
            .get_message(message_id)
            .await?
            .ok_or(ChatError::MessageNotFound)?;

        self.authorize(session, &message).await?;

        // Only the call that flips the flag notifies the sender
        if !self.repository.mark_message_read(message_id).await? {
            tracing::debug!(message_id = %message_id, "Message already read");
            return Ok(());
        }

        let event = ServerEvent::MessageRead {
            message_id,
            read_by: session.user_id(),
        };
        match self.message_pusher.push_to(message.sender_id, &event).await {
            Ok(()) | Err(MessagePushError::ClientNotFound(_)) => {}
            Err(e) => tracing::warn!(
                message_id = %message_id,
                sender_id = %message.sender_id,
                error = %e,
                "Failed to deliver read receipt"
            ),
        }

        Ok(())
    }

    async fn authorize(
        &self,
        session: &AuthenticatedSession,
        message: &ChatMessage,
    ) -> Result<(), ChatError> {
        let allowed = match message.recipient {
            Recipient::User(receiver_id) => receiver_id == session.user_id(),
            Recipient::Chama(chama_id) => self
                .repository
                .get_chama_member(chama_id, session.user_id())
                .await?
                .is_some(),
        };
        if allowed {
            Ok(())
        } else {
            Err(ChatError::NotAuthorizedToMarkRead)
        }
    }
}
