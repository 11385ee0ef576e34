//! Real-time messaging core for Tujifund chamas.
//!
//! Members of a chama exchange direct messages and room messages over a
//! WebSocket. The crate keeps track of which sockets belong to which user,
//! which sockets are subscribed to which chama room, and propagates read
//! receipts back to the original sender.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
