//! Conversion logic between DTOs and domain types.
//!
//! Inbound frames are parsed into [`ClientFrameDto`] and then validated into
//! a domain [`Frame`]; both steps report failures as [`FrameError`].

use thiserror::Error;
use tujifund_shared::time::timestamp_to_eat_rfc3339;

use crate::domain::{
    ChamaId, Frame, ItemId, MessageContent, MessageId, MessageView, SenderSummary, ServerEvent,
    UserId,
};

use super::websocket::{ClientFrameDto, MessageDto, SenderDto, ServerFrameDto};

/// A client frame that could not be parsed or failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct FrameError {
    pub reason: String,
}

impl FrameError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(format!("missing field `{}`", field))
    }
}

/// Parse and validate one text frame.
pub fn decode_frame(text: &str) -> Result<Frame, FrameError> {
    let dto: ClientFrameDto =
        serde_json::from_str(text).map_err(|e| FrameError::new(e.to_string()))?;
    Frame::try_from(dto)
}

/// Encode a server event as a JSON text frame.
pub fn encode_event(event: &ServerEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerFrameDto::from(event))
}

fn content(value: Option<String>) -> Result<MessageContent, FrameError> {
    let value = value.ok_or_else(|| FrameError::missing("content"))?;
    MessageContent::new(value).map_err(|e| FrameError::new(e.to_string()))
}

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<ClientFrameDto> for Frame {
    type Error = FrameError;

    fn try_from(dto: ClientFrameDto) -> Result<Self, Self::Error> {
        let frame = match dto {
            ClientFrameDto::Auth { user_id } => Frame::Auth {
                user_id: UserId::new(user_id.ok_or_else(|| FrameError::missing("userId"))?),
            },
            ClientFrameDto::JoinChama { chama_id } => Frame::JoinChama {
                chama_id: ChamaId::new(chama_id.ok_or_else(|| FrameError::missing("chamaId"))?),
            },
            ClientFrameDto::DirectMessage {
                receiver_id,
                content: text,
                item_id,
            } => Frame::DirectMessage {
                receiver_id: UserId::new(
                    receiver_id.ok_or_else(|| FrameError::missing("receiverId"))?,
                ),
                content: content(text)?,
                item_id: item_id.map(ItemId::new),
            },
            ClientFrameDto::ChamaMessage {
                chama_id,
                content: text,
            } => Frame::ChamaMessage {
                chama_id: ChamaId::new(chama_id.ok_or_else(|| FrameError::missing("chamaId"))?),
                content: content(text)?,
            },
            ClientFrameDto::MarkRead { message_id } => Frame::MarkRead {
                message_id: MessageId::new(
                    message_id.ok_or_else(|| FrameError::missing("messageId"))?,
                ),
            },
        };
        Ok(frame)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&SenderSummary> for SenderDto {
    fn from(sender: &SenderSummary) -> Self {
        Self {
            id: sender.id.value(),
            username: sender.username.clone(),
            full_name: sender.full_name.clone(),
            profile_pic: sender.profile_pic.clone(),
        }
    }
}

impl From<&MessageView> for MessageDto {
    fn from(view: &MessageView) -> Self {
        let message = &view.message;
        Self {
            id: message.id.value(),
            sender_id: message.sender_id.value(),
            receiver_id: message.receiver_id().map(|id| id.value()),
            chama_id: message.chama_id().map(|id| id.value()),
            item_id: message.item_id.map(|id| id.value()),
            content: message.content.as_str().to_string(),
            is_read: message.is_read,
            sent_at: timestamp_to_eat_rfc3339(message.sent_at),
            sender: SenderDto::from(&view.sender),
        }
    }
}

impl From<&ServerEvent> for ServerFrameDto {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::AuthSuccess { user_id } => ServerFrameDto::AuthSuccess {
                user_id: user_id.value(),
            },
            ServerEvent::JoinChamaSuccess { chama_id } => ServerFrameDto::JoinChamaSuccess {
                chama_id: chama_id.value(),
            },
            ServerEvent::DirectMessage(view) => ServerFrameDto::DirectMessage {
                message: MessageDto::from(view),
            },
            ServerEvent::ChamaMessage(view) => ServerFrameDto::ChamaMessage {
                message: MessageDto::from(view),
            },
            ServerEvent::MessageSent { message_id } => ServerFrameDto::MessageSent {
                message_id: message_id.value(),
            },
            ServerEvent::MessageRead {
                message_id,
                read_by,
            } => ServerFrameDto::MessageRead {
                message_id: message_id.value(),
                read_by: read_by.value(),
            },
            ServerEvent::Error { message } => ServerFrameDto::Error {
                message: message.clone(),
            },
        }
    }
}
