//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// UserName validation error
    #[error("UserName cannot be empty")]
    UserNameEmpty,

    /// UserName too long error
    #[error("UserName cannot exceed {max} characters (got {actual})")]
    UserNameTooLong { max: usize, actual: usize },

    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// MessageBody validation error
    #[error("MessageBody cannot be empty")]
    MessageBodyEmpty,

    /// MessageBody too long error
    #[error("MessageBody cannot exceed {max} characters (got {actual})")]
    MessageBodyTooLong { max: usize, actual: usize },
}

/// Errors returned by the session registry and the room directory
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Display name held by another live session
    #[error("Display name '{0}' is already taken")]
    DuplicateName(String),

    /// Display name is reserved for server notices
    #[error("Display name '{0}' is reserved")]
    ReservedName(String),

    /// Connection already has a session
    #[error("Connection '{0}' is already registered")]
    AlreadyRegistered(String),

    /// Room name collision
    #[error("Room '{0}' already exists")]
    RoomAlreadyExists(String),

    /// No session for the connection
    #[error("Session for connection '{0}' not found")]
    SessionNotFound(String),

    /// No session with the display name
    #[error("User '{0}' not found")]
    UserNotFound(String),

    /// No room with the name
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}
