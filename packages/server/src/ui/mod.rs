//! WebSocket and HTTP surface of the chat server.

mod handler;
mod server;
pub mod session;
mod signal;
pub mod state;

pub use server::{Server, build_router};
pub use session::ChatSession;
pub use state::AppState;
