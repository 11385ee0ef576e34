//! UseCase: チャマ（ルーム）への参加処理
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーが参加し、Room Membership Index に追加される
//! - 異常系：存在しないチャマ、メンバーではないユーザー（以前のルームに留まる）
//! - エッジケース：別のチャマへの切り替え（以前のルームから先に削除される）

use std::sync::Arc;

use crate::domain::{
    AuthenticatedSession, ChamaId, ChatRepository, Connection, MessagePusher,
};

use super::error::ChatError;

/// チャマ参加のユースケース
pub struct JoinChamaUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinChamaUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// チャマ参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Option<ChamaId>)` - 参加成功（退出したチャマがあればその ID）
    /// * `Err(ChatError)` - `RoomNotFound` / `NotARoomMember`
    pub async fn execute(
        &self,
        session: &AuthenticatedSession,
        chama_id: ChamaId,
        connection: Connection,
    ) -> Result<Option<ChamaId>, ChatError> {
        // 1. チャマの存在確認
        self.repository
            .get_chama(chama_id)
            .await?
            .ok_or(ChatError::RoomNotFound)?;

        // 2. メンバーシップ確認
        self.repository
            .get_chama_member(chama_id, session.user_id())
            .await?
            .ok_or(ChatError::NotARoomMember)?;

        // 3. Room Membership Index に追加（以前のルームからは先に削除される）
        let previous = self
            .message_pusher
            .join_room(chama_id, session.user_id(), connection)
            .await;

        Ok(previous)
    }
}
