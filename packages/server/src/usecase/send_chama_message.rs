//! UseCase: チャマメッセージ送信処理
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージを永続化し、ルームの全購読者（送信者自身を含む）に配信
//! - 異常系：メンバーではないユーザーからの送信（永続化されない）

use std::sync::Arc;

use crate::domain::{
    AuthenticatedSession, ChamaId, ChatRepository, MessageContent, MessageId, MessagePusher,
    MessageView, NewMessage, Recipient, ServerEvent,
};

use super::error::ChatError;

/// チャマメッセージ送信のユースケース
pub struct SendChamaMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendChamaMessageUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// チャマメッセージ送信を実行
    ///
    /// 送信者はストレージ上でチャマのメンバーである必要があるが、
    /// ライブルームに参加している必要はない。
    pub async fn execute(
        &self,
        session: &AuthenticatedSession,
        chama_id: ChamaId,
        content: MessageContent,
    ) -> Result<MessageId, ChatError> {
        // 1. メンバーシップ確認
        self.repository
            .get_chama_member(chama_id, session.user_id())
            .await?
            .ok_or(ChatError::NotARoomMember)?;
        let sender = self
            .repository
            .get_user(session.user_id())
            .await?
            .ok_or(ChatError::UserNotFound)?;

        // 2. 永続化
        let message = self
            .repository
            .create_message(NewMessage {
                sender_id: sender.id,
                recipient: Recipient::Chama(chama_id),
                content,
                item_id: None,
            })
            .await?;
        let message_id = message.id;

        // 3. ルームの購読者全員に配信（送信者も除外しない）
        let event = ServerEvent::ChamaMessage(MessageView {
            message,
            sender: sender.summary(),
        });
        let delivered = self.message_pusher.broadcast_room(chama_id, &event).await;
        tracing::debug!(
            message_id = %message_id,
            chama_id = %chama_id,
            delivered,
            "Fanned out chama message"
        );

        Ok(message_id)
    }
}
