//! WebSocket message DTOs for the chat application.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, OutboundEvent, Room};

/// Inbound action sent by a client, tagged by `action`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientAction {
    Init { name: String },
    Message { name: String, body: String },
    EnterRoom { room_name: String },
    LeaveRoom { room_name: String },
    CreateRoom { room_name: String },
    ListRoom,
    ExternalAction { kind: String },
}

/// Message payload: `{sender, time, body}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub sender: String,
    pub time: String,
    pub body: String,
}

impl From<&ChatMessage> for MessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            sender: message.sender.to_string(),
            time: message.time.clone(),
            body: message.body.to_string(),
        }
    }
}

/// Room directory entry: `{name, createdAt, users}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshotDto {
    pub name: String,
    pub created_at: String,
    pub users: Vec<String>,
}

impl From<&Room> for RoomSnapshotDto {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name.to_string(),
            created_at: room.created_at.clone(),
            users: room.users.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Outbound frame: `{"event": ..., "data": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    Room(Vec<RoomSnapshotDto>),
    Message(MessageDto),
    ExternalAction(String),
    /// Direct reply to a refused `init`
    Rejected(String),
}

impl ServerEvent {
    /// The refusal sent back for a failed `init`
    pub fn rejected() -> Self {
        ServerEvent::Rejected("nope".to_string())
    }
}

impl From<&OutboundEvent> for ServerEvent {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::RoomList(rooms) => {
                ServerEvent::Room(rooms.iter().map(RoomSnapshotDto::from).collect())
            }
            OutboundEvent::Message(message) => ServerEvent::Message(MessageDto::from(message)),
            OutboundEvent::ExternalAction(text) => ServerEvent::ExternalAction(text.clone()),
        }
    }
}
