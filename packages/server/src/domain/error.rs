//! Domain-level errors.

use thiserror::Error;

/// Error raised when constructing a value object from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("content cannot be empty")]
    ContentEmpty,

    #[error("content is too long ({actual} characters, max {max})")]
    ContentTooLong { max: usize, actual: usize },
}

/// Error raised by an invalid session state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session is not authenticated")]
    NotAuthenticated,

    #[error("session is already authenticated")]
    AlreadyAuthenticated,

    #[error("session is closed")]
    Closed,
}

/// Error raised by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("message {0} not found")]
    MessageNotFound(i64),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Error raised when pushing a frame to a live connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("user {0} is not connected")]
    ClientNotFound(i64),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
