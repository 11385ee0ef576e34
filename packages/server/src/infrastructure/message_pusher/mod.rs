//! メッセージ送信（通知）の実装
//!
//! - `registry`: ユーザー ID → 接続
//! - `room_index`: チャマ ID → 購読中の接続
//! - `websocket`: 上記二つを束ねた `MessagePusher` の WebSocket 実装

pub mod registry;
pub mod room_index;
pub mod websocket;

pub use registry::ConnectionRegistry;
pub use room_index::{RoomMembershipIndex, RoomSubscriber};
pub use websocket::{ConnectionManager, ConnectionsSnapshot};
