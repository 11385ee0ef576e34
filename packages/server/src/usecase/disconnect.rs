//! UseCase: ソケット切断処理
//!
//! 切断された接続を Connection Registry と Room Membership Index の両方から
//! 削除する。冪等で、二回呼んでもエラーにならない。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// 切断のユースケース
pub struct DisconnectUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn execute(&self, connection_id: ConnectionId) {
        self.message_pusher.unregister_client(connection_id).await;
    }
}
