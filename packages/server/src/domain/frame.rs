//! Client requests and server events exchanged over a chat socket.

use super::{
    entity::MessageView,
    value_object::{ChamaId, ItemId, MessageContent, MessageId, UserId},
};

/// A validated client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Auth {
        user_id: UserId,
    },
    JoinChama {
        chama_id: ChamaId,
    },
    DirectMessage {
        receiver_id: UserId,
        content: MessageContent,
        item_id: Option<ItemId>,
    },
    ChamaMessage {
        chama_id: ChamaId,
        content: MessageContent,
    },
    MarkRead {
        message_id: MessageId,
    },
}

impl Frame {
    /// Wire name of the frame kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::Auth { .. } => "auth",
            Frame::JoinChama { .. } => "join_chama",
            Frame::DirectMessage { .. } => "direct_message",
            Frame::ChamaMessage { .. } => "chama_message",
            Frame::MarkRead { .. } => "mark_read",
        }
    }
}

/// An event pushed from the server to a socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    AuthSuccess { user_id: UserId },
    JoinChamaSuccess { chama_id: ChamaId },
    DirectMessage(MessageView),
    ChamaMessage(MessageView),
    MessageSent { message_id: MessageId },
    MessageRead { message_id: MessageId, read_by: UserId },
    Error { message: String },
}
