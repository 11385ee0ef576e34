//! Infrastructure layer: wire DTOs, the in-memory storage collaborator and
//! the WebSocket connection manager.

pub mod dto;
pub mod message_pusher;
pub mod repository;
