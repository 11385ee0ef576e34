//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object with a `type` discriminator; field names are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Raw client frame as received from the socket.
///
/// All fields are optional so that a missing field is reported as a
/// validation error naming the field, rather than as a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientFrameDto {
    Auth {
        user_id: Option<i64>,
    },
    JoinChama {
        chama_id: Option<i64>,
    },
    DirectMessage {
        receiver_id: Option<i64>,
        content: Option<String>,
        item_id: Option<i64>,
    },
    ChamaMessage {
        chama_id: Option<i64>,
        content: Option<String>,
    },
    MarkRead {
        message_id: Option<i64>,
    },
}

/// Frame sent from the server to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerFrameDto {
    AuthSuccess { user_id: i64 },
    JoinChamaSuccess { chama_id: i64 },
    DirectMessage { message: MessageDto },
    ChamaMessage { message: MessageDto },
    MessageSent { message_id: i64 },
    MessageRead { message_id: i64, read_by: i64 },
    Error { message: String },
}

/// Persisted message with its denormalized sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: Option<i64>,
    pub chama_id: Option<i64>,
    pub item_id: Option<i64>,
    pub content: String,
    pub is_read: bool,
    /// RFC 3339 (EAT)
    pub sent_at: String,
    pub sender: SenderDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderDto {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub profile_pic: Option<String>,
}
