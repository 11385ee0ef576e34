//! UseCase: ソケットの認証処理
//!
//! ### どのような状況を想定しているか
//! - 正常系：存在するユーザーで認証し、Connection Registry に登録される
//! - 異常系：存在しないユーザー（登録されない）
//! - エッジケース：同一ユーザーの二重接続（新しい接続で上書き）

use std::sync::Arc;

use crate::domain::{ChatRepository, Connection, MessagePusher, User, UserId};

use super::error::ChatError;

/// 認証のユースケース
pub struct AuthenticateUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl AuthenticateUseCase {
    /// 新しい AuthenticateUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 認証を実行
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 認証成功（接続は Connection Registry に登録済み）
    /// * `Err(ChatError::UserNotFound)` - ユーザーが存在しない
    pub async fn execute(
        &self,
        user_id: UserId,
        connection: Connection,
    ) -> Result<User, ChatError> {
        let user = self
            .repository
            .get_user(user_id)
            .await?
            .ok_or(ChatError::UserNotFound)?;

        self.message_pusher.register_client(user_id, connection).await;

        Ok(user)
    }
}
