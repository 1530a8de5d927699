//! UseCase 層のエラー定義
//!
//! どのエラーもアクション境界（`PresenceEngine` の呼び出し元）で吸収され、
//! クライアントから見える効果は「何も起きない」になります。

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// Why a presence action was refused
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresenceError {
    /// Display name collision on init
    #[error("Display name '{0}' is already taken")]
    DuplicateName(String),

    /// Attempt to take the reserved `system` name
    #[error("Display name '{0}' is reserved")]
    ReservedName(String),

    /// Room name collision
    #[error("Room '{0}' already exists")]
    AlreadyExists(String),

    /// Lookup miss (rooms, sessions, named targets)
    #[error("{0} not found")]
    NotFound(String),

    /// Action attempted from the wrong presence state
    #[error("Action not allowed: {0}")]
    UnauthorizedState(String),

    /// Malformed parameter
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValueObjectError),
}

impl From<RepositoryError> for PresenceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::DuplicateName(name) => PresenceError::DuplicateName(name),
            RepositoryError::ReservedName(name) => PresenceError::ReservedName(name),
            RepositoryError::AlreadyRegistered(id) => {
                PresenceError::UnauthorizedState(format!("connection '{id}' is already identified"))
            }
            RepositoryError::RoomAlreadyExists(name) => PresenceError::AlreadyExists(name),
            RepositoryError::SessionNotFound(id) => {
                PresenceError::NotFound(format!("session for connection '{id}'"))
            }
            RepositoryError::UserNotFound(name) => PresenceError::NotFound(format!("user '{name}'")),
            RepositoryError::RoomNotFound(name) => PresenceError::NotFound(format!("room '{name}'")),
        }
    }
}
