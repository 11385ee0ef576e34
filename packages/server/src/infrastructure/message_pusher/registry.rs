//! Connection Registry: authenticated user id → live connection.
//!
//! One live connection per user. A newer registration for the same user
//! replaces the older one; the replaced socket is no longer reachable through
//! the registry but its own removal cannot evict the newer entry.

use std::collections::HashMap;

use crate::domain::{Connection, ConnectionId, UserId};

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    by_user: HashMap<UserId, Connection>,
    owners: HashMap<ConnectionId, UserId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `connection` for `user_id`, returning the replaced connection.
    pub fn register(&mut self, user_id: UserId, connection: Connection) -> Option<Connection> {
        let connection_id = connection.id;
        let replaced = self.by_user.insert(user_id, connection);
        if let Some(previous) = &replaced {
            self.owners.remove(&previous.id);
        }
        self.owners.insert(connection_id, user_id);
        replaced
    }

    pub fn lookup(&self, user_id: UserId) -> Option<&Connection> {
        self.by_user.get(&user_id)
    }

    pub fn remove(&mut self, user_id: UserId) -> Option<Connection> {
        let connection = self.by_user.remove(&user_id)?;
        self.owners.remove(&connection.id);
        Some(connection)
    }

    /// Remove the entry owned by `connection_id`, if it is still the live one.
    pub fn remove_connection(&mut self, connection_id: ConnectionId) -> Option<UserId> {
        let user_id = self.owners.remove(&connection_id)?;
        self.by_user.remove(&user_id);
        Some(user_id)
    }

    /// (user id, connection id) pairs sorted by user id.
    pub fn entries(&self) -> Vec<(UserId, ConnectionId)> {
        let mut entries: Vec<(UserId, ConnectionId)> = self
            .by_user
            .iter()
            .map(|(user_id, connection)| (*user_id, connection.id))
            .collect();
        entries.sort_by_key(|(user_id, _)| *user_id);
        entries
    }
}
