//! Collaborators shared by every usecase.
//!
//! The Session Registry, Room Directory and Message Log are injected as
//! explicitly owned stores so each test can build isolated instances.

use std::sync::Arc;

use crate::domain::{
    BroadcastGateway, Channel, ChatMessage, Clock, ConnectionId, MessageBody, MessageRepository,
    OutboundEvent, PresenceState, Room, RoomRepository, Session, SessionRepository, UserName,
};

use super::error::PresenceError;

#[derive(Clone)]
pub struct PresenceContext {
    pub sessions: Arc<dyn SessionRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub gateway: Arc<dyn BroadcastGateway>,
    pub clock: Arc<dyn Clock>,
}

impl PresenceContext {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        rooms: Arc<dyn RoomRepository>,
        messages: Arc<dyn MessageRepository>,
        gateway: Arc<dyn BroadcastGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            rooms,
            messages,
            gateway,
            clock,
        }
    }

    /// Session of an identified connection.
    ///
    /// A connection that never completed `init` is in the wrong state rather
    /// than "not found".
    pub async fn require_session(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Session, PresenceError> {
        self.sessions.lookup(connection_id).await.map_err(|_| {
            PresenceError::UnauthorizedState(format!(
                "connection '{connection_id}' has not identified itself"
            ))
        })
    }

    pub async fn presence_state(&self, connection_id: &ConnectionId) -> PresenceState {
        match self.sessions.lookup(connection_id).await {
            Ok(session) => session.state(),
            Err(_) => PresenceState::Anonymous,
        }
    }

    /// Build a message stamped with the current time and append it to the log.
    ///
    /// The returned value is the exact record that gets broadcast.
    pub async fn record_message(&self, sender: UserName, body: MessageBody) -> ChatMessage {
        let message = ChatMessage::new(sender, self.clock.now(), body);
        self.messages.append(message.clone()).await;
        message
    }

    /// Record a notice signed by `system`.
    pub async fn record_notice(&self, text: String) -> Result<ChatMessage, PresenceError> {
        let body = MessageBody::new(text)?;
        Ok(self.record_message(UserName::system(), body).await)
    }

    /// Push the full room directory to the `system` channel.
    pub async fn broadcast_room_list(&self) -> Vec<Room> {
        let rooms = self.rooms.list_all().await;
        self.gateway
            .broadcast(&Channel::System, OutboundEvent::RoomList(rooms.clone()))
            .await;
        rooms
    }
}
