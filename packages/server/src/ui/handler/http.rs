//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomName,
    infrastructure::dto::{
        http::{HealthDto, RoomDetailDto},
        websocket::RoomSnapshotDto,
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto::ok())
}

/// Get the room directory in creation order
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSnapshotDto>> {
    let rooms = state.engine.context().rooms.list_all().await;
    Json(rooms.iter().map(RoomSnapshotDto::from).collect())
}

/// Get room detail by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_name = RoomName::new(room_name).map_err(|_| StatusCode::NOT_FOUND)?;
    let ctx = state.engine.context();
    let room = ctx
        .rooms
        .find(&room_name)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let mut user_names = Vec::with_capacity(room.users.len());
    for member in &room.users {
        match ctx.sessions.lookup(member).await {
            Ok(session) => user_names.push(session.name.to_string()),
            Err(_) => tracing::warn!("Room '{}' lists unknown member '{}'", room.name, member),
        }
    }

    Ok(Json(RoomDetailDto {
        name: room.name.to_string(),
        created_at: room.created_at.clone(),
        users: room.users.iter().map(|id| id.to_string()).collect(),
        user_names,
    }))
}
