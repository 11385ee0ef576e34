//! Room Membership Index: chama id → connections subscribed to its live room.
//!
//! A connection is subscribed to at most one room. `join` removes the
//! connection from its current room before adding it to the new one.

use std::collections::HashMap;

use crate::domain::{ChamaId, Connection, ConnectionId, UserId};

/// A connection subscribed to a room, with the user it is authenticated as.
#[derive(Debug, Clone)]
pub struct RoomSubscriber {
    pub user_id: UserId,
    pub connection: Connection,
}

#[derive(Debug, Default)]
pub struct RoomMembershipIndex {
    rooms: HashMap<ChamaId, HashMap<ConnectionId, RoomSubscriber>>,
    joined: HashMap<ConnectionId, ChamaId>,
}

impl RoomMembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `connection` to `chama_id`. Returns the room it left.
    pub fn join(
        &mut self,
        chama_id: ChamaId,
        user_id: UserId,
        connection: Connection,
    ) -> Option<ChamaId> {
        let connection_id = connection.id;
        let previous = self.leave_current(connection_id);
        self.rooms.entry(chama_id).or_default().insert(
            connection_id,
            RoomSubscriber {
                user_id,
                connection,
            },
        );
        self.joined.insert(connection_id, chama_id);
        previous
    }

    /// Unsubscribe `connection_id` from `chama_id`. No-op if it is in another room.
    pub fn leave(&mut self, chama_id: ChamaId, connection_id: ConnectionId) -> bool {
        if self.joined.get(&connection_id) != Some(&chama_id) {
            return false;
        }
        self.leave_current(connection_id).is_some()
    }

    /// Unsubscribe `connection_id` from whichever room it is in.
    pub fn leave_current(&mut self, connection_id: ConnectionId) -> Option<ChamaId> {
        let chama_id = self.joined.remove(&connection_id)?;
        if let Some(members) = self.rooms.get_mut(&chama_id) {
            members.remove(&connection_id);
            if members.is_empty() {
                self.rooms.remove(&chama_id);
            }
        }
        Some(chama_id)
    }

    pub fn members(&self, chama_id: ChamaId) -> Vec<&RoomSubscriber> {
        self.rooms
            .get(&chama_id)
            .map(|members| members.values().collect())
            .unwrap_or_default()
    }

    /// (chama id, connection ids) pairs sorted by chama id.
    pub fn entries(&self) -> Vec<(ChamaId, Vec<ConnectionId>)> {
        let mut entries: Vec<(ChamaId, Vec<ConnectionId>)> = self
            .rooms
            .iter()
            .map(|(chama_id, members)| (*chama_id, members.keys().copied().collect()))
            .collect();
        entries.sort_by_key(|(chama_id, _)| *chama_id);
        entries
    }
}
