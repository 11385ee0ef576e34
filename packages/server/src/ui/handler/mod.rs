//! Axum handlers.

mod http;
mod websocket;

pub use http::{debug_connections, get_online_members, health_check};
pub use websocket::websocket_handler;
