//! Repository traits owned by the domain layer.
//!
//! The usecase layer depends on these traits only; the in-memory
//! implementations live in `infrastructure::repository` (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Room, Session},
    error::RepositoryError,
    value_object::{ConnectionId, RoomName, UserName},
};

/// Session Registry: who is connected as whom.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Bind a display name to a connection.
    ///
    /// # Errors
    ///
    /// `ReservedName` for `system`, `DuplicateName` when another live session
    /// holds the name, `AlreadyRegistered` when the connection already has one.
    async fn register(
        &self,
        connection_id: ConnectionId,
        name: UserName,
    ) -> Result<Session, RepositoryError>;

    /// Session owned by a connection.
    async fn lookup(&self, connection_id: &ConnectionId) -> Result<Session, RepositoryError>;

    /// Session holding a display name.
    async fn find_by_name(&self, name: &UserName) -> Result<Session, RepositoryError>;

    /// Set or clear the current room of a session.
    async fn set_room(
        &self,
        connection_id: &ConnectionId,
        room: Option<RoomName>,
    ) -> Result<(), RepositoryError>;

    /// Delete a session, returning what it held.
    async fn remove(&self, connection_id: &ConnectionId) -> Result<Session, RepositoryError>;

    /// Number of live sessions.
    async fn count(&self) -> usize;
}

/// Room Directory: who is in which room.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Create an empty room.
    ///
    /// # Errors
    ///
    /// `RoomAlreadyExists` on a name collision.
    async fn create(&self, name: RoomName, created_at: String) -> Result<Room, RepositoryError>;

    /// Room by name.
    async fn find(&self, name: &RoomName) -> Result<Room, RepositoryError>;

    /// All rooms in creation order.
    async fn list_all(&self) -> Vec<Room>;

    /// Append a member unless already present.
    ///
    /// Returns `Ok(false)` when the connection was already a member.
    ///
    /// # Errors
    ///
    /// `RoomNotFound` when the room does not exist.
    async fn add_member(
        &self,
        name: &RoomName,
        connection_id: ConnectionId,
    ) -> Result<bool, RepositoryError>;

    /// Remove a member. Never fails: a missing room or member yields `false`.
    async fn remove_member(&self, name: &RoomName, connection_id: &ConnectionId) -> bool;

    /// Names of every room whose membership contains the connection.
    async fn rooms_containing(&self, connection_id: &ConnectionId) -> Vec<RoomName>;
}

/// Message Log: flat, append-only, cross-room.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message.
    async fn append(&self, message: ChatMessage);

    /// Every message in append order.
    async fn history(&self) -> Vec<ChatMessage>;

    /// Number of stored messages.
    async fn count(&self) -> usize;
}
