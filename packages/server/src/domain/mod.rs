//! Domain layer: value objects, entities, the session state machine and the
//! interfaces of the storage and delivery collaborators.

pub mod entity;
pub mod error;
pub mod frame;
pub mod pusher;
pub mod repository;
pub mod session;
pub mod value_object;

pub use entity::{
    Chama, ChamaMember, ChatMessage, MemberRole, MessageView, NewMessage, Recipient,
    SenderSummary, User,
};
pub use error::{MessagePushError, RepositoryError, SessionError, ValueObjectError};
pub use frame::{Frame, ServerEvent};
pub use pusher::{Connection, MessagePusher, PusherChannel};
pub use repository::ChatRepository;
#[cfg(test)]
pub use repository::MockChatRepository;
pub use session::{AuthenticatedSession, SessionState};
pub use value_object::{
    ChamaId, ConnectionId, ItemId, MAX_CONTENT_CHARS, MessageContent, MessageId, UserId,
};
