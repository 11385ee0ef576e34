//! Entities owned by the storage collaborator and read by the messaging core.

use serde::{Deserialize, Serialize};

use super::value_object::{ChamaId, ItemId, MessageContent, MessageId, UserId};

/// Registered Tujifund user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub profile_pic: Option<String>,
}

impl User {
    /// Denormalized summary attached to delivered messages.
    pub fn summary(&self) -> SenderSummary {
        SenderSummary {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            profile_pic: self.profile_pic.clone(),
        }
    }
}

/// Savings group; its id is also the live chat room id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chama {
    pub id: ChamaId,
    pub name: String,
}

/// Role a user holds inside a chama.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Treasurer,
    Secretary,
    #[default]
    Member,
}

/// Membership row linking a user to a chama.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChamaMember {
    pub chama_id: ChamaId,
    pub user_id: UserId,
    #[serde(default)]
    pub role: MemberRole,
}

/// Addressee of a chat message: exactly one receiver user or one chama.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    User(UserId),
    Chama(ChamaId),
}

/// Message about to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub recipient: Recipient,
    pub content: MessageContent,
    pub item_id: Option<ItemId>,
}

/// Persisted chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: UserId,
    pub recipient: Recipient,
    pub content: MessageContent,
    pub item_id: Option<ItemId>,
    pub is_read: bool,
    /// Unix timestamp (milliseconds)
    pub sent_at: i64,
}

impl ChatMessage {
    pub fn receiver_id(&self) -> Option<UserId> {
        match self.recipient {
            Recipient::User(id) => Some(id),
            Recipient::Chama(_) => None,
        }
    }

    pub fn chama_id(&self) -> Option<ChamaId> {
        match self.recipient {
            Recipient::Chama(id) => Some(id),
            Recipient::User(_) => None,
        }
    }
}

/// Public profile fields of a message sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderSummary {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub profile_pic: Option<String>,
}

/// Persisted message together with its sender summary, as delivered live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub message: ChatMessage,
    pub sender: SenderSummary,
}
