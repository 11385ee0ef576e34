//! Per-socket chat session: the frame dispatch boundary.
//!
//! A `ChatSession` owns the socket's [`SessionState`] and routes every
//! inbound text frame to the matching use case. Every failure is turned into
//! a single `error` frame on the same socket; the socket is never closed
//! because of a frame error.

use std::sync::Arc;

use crate::{
    domain::{Connection, ConnectionId, Frame, ServerEvent, SessionState},
    infrastructure::dto::{decode_frame, encode_event},
    usecase::ChatError,
};

use super::state::AppState;

pub struct ChatSession {
    app: Arc<AppState>,
    connection: Connection,
    state: SessionState,
}

impl ChatSession {
    pub fn new(app: Arc<AppState>, connection: Connection) -> Self {
        Self {
            app,
            connection,
            state: SessionState::default(),
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Parse, dispatch and answer one text frame.
    pub async fn handle_text(&mut self, text: &str) {
        let result = match decode_frame(text) {
            Ok(frame) => self.dispatch(frame).await,
            Err(e) => Err(ChatError::from(e)),
        };

        match result {
            Ok(Some(event)) => self.reply(&event),
            Ok(None) => {}
            Err(error) => {
                match &error {
                    ChatError::Internal(detail) => tracing::error!(
                        connection_id = %self.connection.id,
                        detail = %detail,
                        "Frame failed with internal error"
                    ),
                    _ => tracing::warn!(
                        connection_id = %self.connection.id,
                        error = %error,
                        "Frame rejected"
                    ),
                }
                self.reply(&ServerEvent::Error {
                    message: error.client_message(),
                });
            }
        }
    }

    /// Route a validated frame. Returns the event to send back to this socket.
    pub async fn dispatch(&mut self, frame: Frame) -> Result<Option<ServerEvent>, ChatError> {
        tracing::debug!(
            connection_id = %self.connection.id,
            kind = frame.kind(),
            "Dispatching frame"
        );

        match frame {
            Frame::Auth { user_id } => {
                self.state.ensure_unauthenticated()?;
                self.app
                    .authenticate_usecase
                    .execute(user_id, self.connection.clone())
                    .await?;
                self.state.authenticate(user_id)?;
                tracing::info!(
                    connection_id = %self.connection.id,
                    user_id = %user_id,
                    "Connection authenticated"
                );
                Ok(Some(ServerEvent::AuthSuccess { user_id }))
            }
            Frame::JoinChama { chama_id } => {
                let principal = self.state.principal()?;
                let previous = self
                    .app
                    .join_chama_usecase
                    .execute(&principal, chama_id, self.connection.clone())
                    .await?;
                self.state.enter_chama(chama_id)?;
                tracing::info!(
                    user_id = %principal.user_id(),
                    chama_id = %chama_id,
                    left = ?previous.map(|id| id.value()),
                    "Joined chama room"
                );
                Ok(Some(ServerEvent::JoinChamaSuccess { chama_id }))
            }
            Frame::DirectMessage {
                receiver_id,
                content,
                item_id,
            } => {
                let principal = self.state.principal()?;
                let message_id = self
                    .app
                    .send_direct_message_usecase
                    .execute(&principal, receiver_id, content, item_id)
                    .await?;
                Ok(Some(ServerEvent::MessageSent { message_id }))
            }
            Frame::ChamaMessage { chama_id, content } => {
                let principal = self.state.principal()?;
                let message_id = self
                    .app
                    .send_chama_message_usecase
                    .execute(&principal, chama_id, content)
                    .await?;
                Ok(Some(ServerEvent::MessageSent { message_id }))
            }
            Frame::MarkRead { message_id } => {
                let principal = self.state.principal()?;
                self.app
                    .mark_read_usecase
                    .execute(&principal, message_id)
                    .await?;
                Ok(None)
            }
        }
    }

    /// Enter `Closed` and drop the connection from the registry and rooms.
    pub async fn close(&mut self) {
        if let Some(principal) = self.state.close() {
            tracing::info!(
                connection_id = %self.connection.id,
                user_id = %principal.user_id(),
                "Session closed"
            );
        }
        self.app
            .disconnect_usecase
            .execute(self.connection.id)
            .await;
    }

    fn reply(&self, event: &ServerEvent) {
        let payload = match encode_event(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to encode reply: {}", e);
                return;
            }
        };
        if self.connection.sender.send(payload).is_err() {
            tracing::debug!(connection_id = %self.connection.id, "Socket closed before reply");
        }
    }
}
