//! Per-socket session state machine.
//!
//! ```text
//! Unauthenticated --auth--> Authenticated { chama: None }
//! Authenticated --join_chama--> Authenticated { chama: Some(id) }
//! (any) --close--> Closed
//! ```
//!
//! The user id bound by `authenticate` never changes for the lifetime of
//! the session.

use super::{
    error::SessionError,
    value_object::{ChamaId, UserId},
};

/// Verified principal of a socket, produced only by a successful auth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedSession {
    user_id: UserId,
    chama_id: Option<ChamaId>,
}

impl AuthenticatedSession {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Chama room the socket is currently subscribed to.
    pub fn chama_id(&self) -> Option<ChamaId> {
        self.chama_id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(AuthenticatedSession),
    Closed,
}

impl SessionState {
    /// Principal of the session, or `NotAuthenticated`.
    pub fn principal(&self) -> Result<AuthenticatedSession, SessionError> {
        match self {
            SessionState::Authenticated(session) => Ok(*session),
            SessionState::Unauthenticated => Err(SessionError::NotAuthenticated),
            SessionState::Closed => Err(SessionError::Closed),
        }
    }

    /// Check that `auth` is allowed in the current state.
    pub fn ensure_unauthenticated(&self) -> Result<(), SessionError> {
        match self {
            SessionState::Unauthenticated => Ok(()),
            SessionState::Authenticated(_) => Err(SessionError::AlreadyAuthenticated),
            SessionState::Closed => Err(SessionError::Closed),
        }
    }

    /// Transition `Unauthenticated -> Authenticated`.
    pub fn authenticate(&mut self, user_id: UserId) -> Result<AuthenticatedSession, SessionError> {
        self.ensure_unauthenticated()?;
        let session = AuthenticatedSession {
            user_id,
            chama_id: None,
        };
        *self = SessionState::Authenticated(session);
        Ok(session)
    }

    /// Record the joined chama, returning the one it replaces.
    pub fn enter_chama(&mut self, chama_id: ChamaId) -> Result<Option<ChamaId>, SessionError> {
        match self {
            SessionState::Authenticated(session) => Ok(session.chama_id.replace(chama_id)),
            SessionState::Unauthenticated => Err(SessionError::NotAuthenticated),
            SessionState::Closed => Err(SessionError::Closed),
        }
    }

    /// Enter `Closed`. Returns the principal the first time, `None` afterwards.
    pub fn close(&mut self) -> Option<AuthenticatedSession> {
        match std::mem::replace(self, SessionState::Closed) {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated | SessionState::Closed => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, SessionState::Closed)
    }
}
