//! MessagePusher trait 定義
//!
//! 接続中のソケットの管理（Connection Registry / Room Membership Index）と
//! ライブ配信のインターフェース。配信はベストエフォートで、オフラインの
//! 受信者にはキューイングもリトライも行わない。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::MessagePushError,
    frame::ServerEvent,
    value_object::{ChamaId, ConnectionId, UserId},
};

/// Outbound queue of one socket. Each item is an encoded text frame.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Handle to one live socket.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub sender: PusherChannel,
}

impl Connection {
    pub fn new(sender: PusherChannel) -> Self {
        Self {
            id: ConnectionId::generate(),
            sender,
        }
    }
}

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Bind `user_id` to `connection`, returning the connection it replaced.
    async fn register_client(&self, user_id: UserId, connection: Connection)
    -> Option<ConnectionId>;

    /// Forget a closed socket: its registry entry (only if it still owns it)
    /// and its room subscription. Idempotent.
    async fn unregister_client(&self, connection_id: ConnectionId);

    /// Subscribe a connection to a chama room, leaving its previous room first.
    /// Returns the room that was left.
    async fn join_room(
        &self,
        chama_id: ChamaId,
        user_id: UserId,
        connection: Connection,
    ) -> Option<ChamaId>;

    /// Push an event to the live connection of `user_id`.
    async fn push_to(&self, user_id: UserId, event: &ServerEvent) -> Result<(), MessagePushError>;

    /// Push an event to every connection subscribed to `chama_id`.
    /// Returns the number of sockets that accepted the frame.
    async fn broadcast_room(&self, chama_id: ChamaId, event: &ServerEvent) -> usize;

    /// User ids with a live connection subscribed to `chama_id`, sorted.
    async fn online_members(&self, chama_id: ChamaId) -> Vec<UserId>;
}
