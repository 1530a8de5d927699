//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod clock;
pub mod entity;
pub mod error;
pub mod factory;
pub mod gateway;
pub mod repository;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::{ChatMessage, PresenceState, Room, Session};
pub use error::{RepositoryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use gateway::{BroadcastGateway, Channel, OutboundEvent};
#[cfg(test)]
pub use gateway::MockBroadcastGateway;
pub use repository::{MessageRepository, RoomRepository, SessionRepository};
pub use value_object::{ConnectionId, MessageBody, RoomName, SYSTEM_NAME, UserName};
