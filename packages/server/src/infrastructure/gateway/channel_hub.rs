//! In-process Broadcast Gateway.
//!
//! Every live WebSocket connection registers an unbounded sender; channels keep
//! ordered, duplicate-free member lists. A broadcast serializes the event once
//! and pushes the same JSON frame to every member.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::{
    domain::{BroadcastGateway, Channel, ConnectionId, OutboundEvent},
    infrastructure::dto::websocket::ServerEvent,
};

/// Channel registry and fan-out for locally connected sockets
#[derive(Default)]
pub struct ChannelHub {
    /// Outbound frame sender per live connection
    connections: Mutex<HashMap<ConnectionId, UnboundedSender<String>>>,
    /// Members of each channel in join order
    channels: Mutex<HashMap<Channel, Vec<ConnectionId>>>,
}

impl ChannelHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the outbound sender of a freshly accepted connection.
    pub async fn connect(&self, connection_id: ConnectionId, sender: UnboundedSender<String>) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id, sender);
    }

    /// Forget a connection and drop it from every channel.
    pub async fn disconnect(&self, connection_id: &ConnectionId) {
        {
            let mut channels = self.channels.lock().await;
            for members in channels.values_mut() {
                members.retain(|id| id != connection_id);
            }
            channels.retain(|_, members| !members.is_empty());
        }
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
    }

    /// Send a frame to a single connection.
    ///
    /// Returns `false` if the connection is unknown or its socket is gone.
    pub async fn send_to(&self, connection_id: &ConnectionId, event: &ServerEvent) -> bool {
        let frame = match serde_json::to_string(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to serialize frame for '{}': {}", connection_id, e);
                return false;
            }
        };
        let connections = self.connections.lock().await;
        connections
            .get(connection_id)
            .is_some_and(|sender| sender.send(frame).is_ok())
    }

    /// Current members of a channel, in join order.
    pub async fn members(&self, channel: &Channel) -> Vec<ConnectionId> {
        let channels = self.channels.lock().await;
        channels.get(channel).cloned().unwrap_or_default()
    }

    /// Number of registered connections.
    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}

#[async_trait]
impl BroadcastGateway for ChannelHub {
    async fn join(&self, connection_id: &ConnectionId, channel: &Channel) {
        let mut channels = self.channels.lock().await;
        let members = channels.entry(channel.clone()).or_default();
        if !members.contains(connection_id) {
            members.push(connection_id.clone());
            tracing::debug!("'{}' joined channel {}", connection_id, channel);
        }
    }

    async fn leave(&self, connection_id: &ConnectionId, channel: &Channel) {
        let mut channels = self.channels.lock().await;
        if let Some(members) = channels.get_mut(channel) {
            members.retain(|id| id != connection_id);
            if members.is_empty() {
                channels.remove(channel);
            }
            tracing::debug!("'{}' left channel {}", connection_id, channel);
        }
    }

    async fn broadcast(&self, channel: &Channel, event: OutboundEvent) {
        let frame = match serde_json::to_string(&ServerEvent::from(&event)) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to serialize event for {}: {}", channel, e);
                return;
            }
        };

        let members = self.members(channel).await;
        let connections = self.connections.lock().await;
        for member in &members {
            match connections.get(member) {
                Some(sender) if sender.send(frame.clone()).is_ok() => {}
                _ => tracing::warn!("Failed to deliver {} frame to '{}'", channel, member),
            }
        }
        tracing::debug!("Broadcasted to {} ({} members)", channel, members.len());
    }
}
