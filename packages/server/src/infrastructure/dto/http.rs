//! HTTP API response DTOs.

use serde::Serialize;

/// Users with a live connection in a chama room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineMembersDto {
    pub chama_id: i64,
    pub online_user_ids: Vec<i64>,
}

/// Snapshot of the live connection state (debug endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsDto {
    pub registry: Vec<RegistryEntryDto>,
    pub rooms: Vec<RoomEntryDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntryDto {
    pub user_id: i64,
    pub connection_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomEntryDto {
    pub chama_id: i64,
    pub connection_ids: Vec<String>,
}
