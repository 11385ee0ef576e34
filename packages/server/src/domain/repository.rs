//! Repository trait 定義
//!
//! メッセージングコアが必要とする永続化層（ストレージ協調者）のインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{Chama, ChamaMember, ChatMessage, NewMessage, User},
    error::RepositoryError,
    value_object::{ChamaId, MessageId, UserId},
};

/// Chat Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
/// 参照系は存在しない場合に `Ok(None)` を返し、`Err` はストレージ障害のみを表す。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// ユーザーを取得
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// チャマを取得
    async fn get_chama(&self, id: ChamaId) -> Result<Option<Chama>, RepositoryError>;

    /// チャマのメンバーシップを取得
    async fn get_chama_member(
        &self,
        chama_id: ChamaId,
        user_id: UserId,
    ) -> Result<Option<ChamaMember>, RepositoryError>;

    /// メッセージを作成（ID と送信時刻はストレージが採番する）
    async fn create_message(&self, message: NewMessage) -> Result<ChatMessage, RepositoryError>;

    /// メッセージを取得
    async fn get_message(&self, id: MessageId) -> Result<Option<ChatMessage>, RepositoryError>;

    /// メッセージを既読にする
    ///
    /// 未読から既読へ切り替えたのがこの呼び出しなら `true`、既に既読なら `false`。
    /// 判定と更新は不可分に行われる。
    async fn mark_message_read(&self, id: MessageId) -> Result<bool, RepositoryError>;
}
