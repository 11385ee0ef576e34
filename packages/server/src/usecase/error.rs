//! UseCase 層のエラー定義
//!
//! フレーム処理の失敗はすべて `ChatError` に集約され、UI 層で
//! `{"type":"error","message":...}` に変換される。ソケットは閉じない。

use thiserror::Error;

use crate::{
    domain::{RepositoryError, SessionError},
    infrastructure::dto::FrameError,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Already authenticated")]
    AlreadyAuthenticated,

    #[error("User not found")]
    UserNotFound,

    #[error("Chama not found")]
    RoomNotFound,

    #[error("You are not a member of this chama")]
    NotARoomMember,

    #[error("Invalid message format: {0}")]
    InvalidFrame(String),

    #[error("Message not found")]
    MessageNotFound,

    #[error("Not authorized to mark this message as read")]
    NotAuthorizedToMarkRead,

    /// Unexpected storage failure. The detail is logged, never sent to clients.
    #[error("Internal server error")]
    Internal(String),
}

impl ChatError {
    /// Message shown to the client in an `error` frame.
    pub fn client_message(&self) -> String {
        self.to_string()
    }
}

impl From<RepositoryError> for ChatError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::MessageNotFound(_) => ChatError::MessageNotFound,
            RepositoryError::Unavailable(detail) => ChatError::Internal(detail),
        }
    }
}

impl From<SessionError> for ChatError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::NotAuthenticated | SessionError::Closed => ChatError::NotAuthenticated,
            SessionError::AlreadyAuthenticated => ChatError::AlreadyAuthenticated,
        }
    }
}

impl From<FrameError> for ChatError {
    fn from(error: FrameError) -> Self {
        ChatError::InvalidFrame(error.reason)
    }
}
