//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::ChamaId,
    infrastructure::dto::http::{ConnectionsDto, OnlineMembersDto, RegistryEntryDto, RoomEntryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Users of a chama that currently have a socket subscribed to its room.
///
/// A non-numeric `chama_id` is rejected by the `Path` extractor with 400.
pub async fn get_online_members(
    State(state): State<Arc<AppState>>,
    Path(chama_id): Path<i64>,
) -> Json<OnlineMembersDto> {
    let chama_id = ChamaId::new(chama_id);
    let members = state.get_online_members_usecase.execute(chama_id).await;

    // Domain Model から DTO への変換
    Json(OnlineMembersDto {
        chama_id: chama_id.value(),
        online_user_ids: members.into_iter().map(|id| id.value()).collect(),
    })
}

/// Debug endpoint to get the current registry and room index (for testing purposes)
pub async fn debug_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionsDto> {
    let snapshot = state.connection_manager.snapshot().await;

    Json(ConnectionsDto {
        registry: snapshot
            .registry
            .into_iter()
            .map(|(user_id, connection_id)| RegistryEntryDto {
                user_id: user_id.value(),
                connection_id: connection_id.to_string(),
            })
            .collect(),
        rooms: snapshot
            .rooms
            .into_iter()
            .map(|(chama_id, connections)| RoomEntryDto {
                chama_id: chama_id.value(),
                connection_ids: connections.iter().map(ToString::to_string).collect(),
            })
            .collect(),
    })
}
