//! Broadcast Gateway: the contract the presence engine needs from the
//! transport layer.

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Room},
    value_object::{ConnectionId, RoomName},
};

/// An addressable group of connections.
///
/// Every room maps to its own channel; `System` carries room-list updates to
/// every identified connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    System,
    Room(RoomName),
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::System => write!(f, "system"),
            Channel::Room(name) => write!(f, "room:{name}"),
        }
    }
}

/// Events fanned out to a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Full room directory snapshot
    RoomList(Vec<Room>),
    /// A chat or system message
    Message(ChatMessage),
    /// Activity indicator text; empty clears it
    ExternalAction(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BroadcastGateway: Send + Sync {
    /// Subscribe a connection to a channel.
    async fn join(&self, connection_id: &ConnectionId, channel: &Channel);

    /// Unsubscribe a connection from a channel. Absent members are ignored.
    async fn leave(&self, connection_id: &ConnectionId, channel: &Channel);

    /// Deliver an event to every member of a channel.
    async fn broadcast(&self, channel: &Channel, event: OutboundEvent);
}
