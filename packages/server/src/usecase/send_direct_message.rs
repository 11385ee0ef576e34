//! UseCase: ダイレクトメッセージ送信処理
//!
//! ### 何をテストしているか
//! - メッセージが永続化されてから受信者に配信されること
//! - 受信者がオフラインでも永続化は成功すること（ベストエフォート配信）
//!
//! ### どのような状況を想定しているか
//! - 正常系：オンラインの受信者への配信
//! - エッジケース：オフラインの受信者
//! - 異常系：存在しない受信者、ストレージ障害

use std::sync::Arc;

use crate::domain::{
    AuthenticatedSession, ChatRepository, ItemId, MessageContent, MessageId, MessagePushError,
    MessagePusher, MessageView, NewMessage, Recipient, ServerEvent, UserId,
};

use super::error::ChatError;

/// ダイレクトメッセージ送信のユースケース
pub struct SendDirectMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendDirectMessageUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ダイレクトメッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(MessageId)` - 永続化されたメッセージの ID
    /// * `Err(ChatError)` - `UserNotFound`（送信者・受信者）/ `Internal`
    pub async fn execute(
        &self,
        session: &AuthenticatedSession,
        receiver_id: UserId,
        content: MessageContent,
        item_id: Option<ItemId>,
    ) -> Result<MessageId, ChatError> {
        let sender = self
            .repository
            .get_user(session.user_id())
            .await?
            .ok_or(ChatError::UserNotFound)?;
        self.repository
            .get_user(receiver_id)
            .await?
            .ok_or(ChatError::UserNotFound)?;

        // 1. 永続化
        let message = self
            .repository
            .create_message(NewMessage {
                sender_id: sender.id,
                recipient: Recipient::User(receiver_id),
                content,
                item_id,
            })
            .await?;
        let message_id = message.id;

        // 2. 受信者が接続中なら配信
        let event = ServerEvent::DirectMessage(MessageView {
            message,
            sender: sender.summary(),
        });
        match self.message_pusher.push_to(receiver_id, &event).await {
            Ok(()) => tracing::debug!(
                message_id = %message_id,
                receiver_id = %receiver_id,
                "Delivered direct message"
            ),
            Err(MessagePushError::ClientNotFound(_)) => tracing::debug!(
                message_id = %message_id,
                receiver_id = %receiver_id,
                "Receiver offline; message persisted only"
            ),
            Err(e) => tracing::warn!(
                message_id = %message_id,
                receiver_id = %receiver_id,
                error = %e,
                "Failed to deliver direct message"
            ),
        }

        Ok(message_id)
    }
}
