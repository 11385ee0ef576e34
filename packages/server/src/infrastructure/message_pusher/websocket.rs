//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - Connection Registry と Room Membership Index をひとつのロックの下で管理
//! - クライアントへのイベント送信（push_to, broadcast_room）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信はベストエフォートで、送信に失敗したソケットはスキップされます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ChamaId, Connection, ConnectionId, MessagePushError, MessagePusher, ServerEvent, UserId,
    },
    infrastructure::dto::encode_event,
};

use super::{registry::ConnectionRegistry, room_index::RoomMembershipIndex};

#[derive(Debug, Default)]
struct Connections {
    registry: ConnectionRegistry,
    rooms: RoomMembershipIndex,
}

/// Point-in-time copy of the live connection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionsSnapshot {
    pub registry: Vec<(UserId, ConnectionId)>,
    pub rooms: Vec<(ChamaId, Vec<ConnectionId>)>,
}

/// Live connection state of one server instance.
///
/// ## 使用例
///
/// ```ignore
/// let manager = Arc::new(ConnectionManager::new());
/// manager.register_client(user_id, connection).await;
/// manager.push_to(user_id, &ServerEvent::AuthSuccess { user_id }).await?;
/// ```
#[derive(Debug, Default)]
pub struct ConnectionManager {
    connections: Mutex<Connections>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> ConnectionsSnapshot {
        let connections = self.connections.lock().await;
        ConnectionsSnapshot {
            registry: connections.registry.entries(),
            rooms: connections.rooms.entries(),
        }
    }

    fn encode(event: &ServerEvent) -> Result<String, MessagePushError> {
        encode_event(event).map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for ConnectionManager {
    async fn register_client(
        &self,
        user_id: UserId,
        connection: Connection,
    ) -> Option<ConnectionId> {
        let mut connections = self.connections.lock().await;
        let replaced = connections.registry.register(user_id, connection);
        if let Some(previous) = &replaced {
            tracing::warn!(
                user_id = %user_id,
                replaced_connection = %previous.id,
                "User authenticated on a new connection; replacing registry entry"
            );
        }
        tracing::debug!(user_id = %user_id, "Client registered to ConnectionManager");
        replaced.map(|previous| previous.id)
    }

    async fn unregister_client(&self, connection_id: ConnectionId) {
        let mut connections = self.connections.lock().await;
        let user_id = connections.registry.remove_connection(connection_id);
        let chama_id = connections.rooms.leave_current(connection_id);
        tracing::debug!(
            connection_id = %connection_id,
            user_id = ?user_id.map(|id| id.value()),
            chama_id = ?chama_id.map(|id| id.value()),
            "Connection unregistered from ConnectionManager"
        );
    }

    async fn join_room(
        &self,
        chama_id: ChamaId,
        user_id: UserId,
        connection: Connection,
    ) -> Option<ChamaId> {
        let mut connections = self.connections.lock().await;
        connections.rooms.join(chama_id, user_id, connection)
    }

    async fn push_to(&self, user_id: UserId, event: &ServerEvent) -> Result<(), MessagePushError> {
        let payload = Self::encode(event)?;
        let connections = self.connections.lock().await;

        let connection = connections
            .registry
            .lookup(user_id)
            .ok_or(MessagePushError::ClientNotFound(user_id.value()))?;
        connection
            .sender
            .send(payload)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!(user_id = %user_id, "Pushed event to client");
        Ok(())
    }

    async fn broadcast_room(&self, chama_id: ChamaId, event: &ServerEvent) -> usize {
        let payload = match Self::encode(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(chama_id = %chama_id, error = %e, "Failed to encode room event");
                return 0;
            }
        };
        let connections = self.connections.lock().await;

        let mut delivered = 0;
        for subscriber in connections.rooms.members(chama_id) {
            // 一部の送信失敗を許容
            match subscriber.connection.sender.send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    chama_id = %chama_id,
                    user_id = %subscriber.user_id,
                    error = %e,
                    "Failed to push room event, skipping"
                ),
            }
        }
        tracing::debug!(chama_id = %chama_id, delivered, "Broadcasted room event");
        delivered
    }

    async fn online_members(&self, chama_id: ChamaId) -> Vec<UserId> {
        let connections = self.connections.lock().await;
        let mut user_ids: Vec<UserId> = connections
            .rooms
            .members(chama_id)
            .into_iter()
            .map(|subscriber| subscriber.user_id)
            .collect();
        user_ids.sort();
        user_ids.dedup();
        user_ids
    }
}
