//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    domain::SystemClock,
    infrastructure::{
        gateway::ChannelHub,
        repository::{InMemoryMessageRepository, InMemoryRoomRepository, InMemorySessionRepository},
    },
    usecase::{PresenceContext, PresenceEngine, PresenceSettings},
};

/// Shared application state
pub struct AppState {
    /// Presence engine（全アクションの入口）
    pub engine: PresenceEngine,
    /// WebSocket sender channels for broadcasting (shared with the engine as its gateway)
    pub hub: Arc<ChannelHub>,
}

impl AppState {
    /// In-memory stores wired to a fresh `ChannelHub`.
    pub fn new(settings: PresenceSettings) -> Self {
        let hub = Arc::new(ChannelHub::new());
        let ctx = PresenceContext::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemoryMessageRepository::new()),
            hub.clone(),
            Arc::new(SystemClock),
        );
        Self {
            engine: PresenceEngine::new(ctx, settings),
            hub,
        }
    }
}
