//! Core domain models for the chat application.

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, MessageBody, RoomName, UserName};

/// Where a connection currently stands in the presence state machine.
///
/// `Anonymous → Identified → (InRoom ⇄ Identified)`; disconnecting removes the
/// session entirely, so there is no stored terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceState {
    /// Connected but never completed `init`
    Anonymous,
    /// Holds a display name, not in any room
    Identified,
    /// Holds a display name and sits in the given room
    InRoom(RoomName),
}

/// The identity bound to one live connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Connection that owns this session
    pub connection_id: ConnectionId,
    /// Display name, unique among live sessions
    pub name: UserName,
    /// Room the user is currently in, if any
    pub room: Option<RoomName>,
}

impl Session {
    /// Create a session that is not in any room
    pub fn new(connection_id: ConnectionId, name: UserName) -> Self {
        Self {
            connection_id,
            name,
            room: None,
        }
    }

    /// Presence state derived from the current room
    pub fn state(&self) -> PresenceState {
        match &self.room {
            Some(room) => PresenceState::InRoom(room.clone()),
            None => PresenceState::Identified,
        }
    }

    /// Whether the session currently sits in `room`
    pub fn is_in(&self, room: &RoomName) -> bool {
        self.room.as_ref() == Some(room)
    }
}

/// A chat room with ordered membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room name (unique key)
    pub name: RoomName,
    /// Formatted creation time
    pub created_at: String,
    /// Member connections in join order, never duplicated
    pub users: Vec<ConnectionId>,
}

impl Room {
    /// Create a new empty room
    pub fn new(name: RoomName, created_at: String) -> Self {
        Self {
            name,
            created_at,
            users: Vec::new(),
        }
    }

    /// Append a member unless already present.
    ///
    /// Returns `false` when the connection was already a member.
    pub fn add_member(&mut self, connection_id: ConnectionId) -> bool {
        if self.has_member(&connection_id) {
            return false;
        }
        self.users.push(connection_id);
        true
    }

    /// Remove the first occurrence of a member.
    ///
    /// Returns `false` when the connection was not a member.
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> bool {
        match self.users.iter().position(|id| id == connection_id) {
            Some(index) => {
                self.users.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the connection is a member
    pub fn has_member(&self, connection_id: &ConnectionId) -> bool {
        self.users.contains(connection_id)
    }
}

/// An immutable chat message record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender display name, or `system` for server notices
    pub sender: UserName,
    /// Formatted send time
    pub time: String,
    /// Message text
    pub body: MessageBody,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(sender: UserName, time: String, body: MessageBody) -> Self {
        Self { sender, time, body }
    }

    /// Whether the server generated this message
    pub fn is_system(&self) -> bool {
        self.sender.is_system()
    }
}
