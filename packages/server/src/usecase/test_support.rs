//! UseCase テスト用の共通フィクスチャ

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        BroadcastGateway, Channel, ConnectionId, FixedClock, OutboundEvent, RoomName, UserName,
    },
    infrastructure::repository::{
        InMemoryMessageRepository, InMemoryRoomRepository, InMemorySessionRepository,
    },
};

use super::context::PresenceContext;

/// Gateway 呼び出しの記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Join(ConnectionId, Channel),
    Leave(ConnectionId, Channel),
    Broadcast(Channel, OutboundEvent),
}

/// 呼び出し順をそのまま記録する Gateway
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
}

impl RecordingGateway {
    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().await.clone()
    }

    pub async fn broadcasts(&self) -> Vec<(Channel, OutboundEvent)> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                GatewayCall::Broadcast(channel, event) => Some((channel.clone(), event.clone())),
                _ => None,
            })
            .collect()
    }

    pub async fn room_list_broadcasts(&self) -> usize {
        self.broadcasts()
            .await
            .iter()
            .filter(|(channel, event)| {
                *channel == Channel::System && matches!(event, OutboundEvent::RoomList(_))
            })
            .count()
    }

    pub async fn clear(&self) {
        self.calls.lock().await.clear();
    }
}

#[async_trait]
impl BroadcastGateway for RecordingGateway {
    async fn join(&self, connection_id: &ConnectionId, channel: &Channel) {
        self.calls
            .lock()
            .await
            .push(GatewayCall::Join(connection_id.clone(), channel.clone()));
    }

    async fn leave(&self, connection_id: &ConnectionId, channel: &Channel) {
        self.calls
            .lock()
            .await
            .push(GatewayCall::Leave(connection_id.clone(), channel.clone()));
    }

    async fn broadcast(&self, channel: &Channel, event: OutboundEvent) {
        self.calls
            .lock()
            .await
            .push(GatewayCall::Broadcast(channel.clone(), event));
    }
}

/// インメモリ Repository と記録用 Gateway で組み立てたコンテキスト
pub fn create_test_context() -> (PresenceContext, Arc<RecordingGateway>) {
    let gateway = Arc::new(RecordingGateway::default());
    (create_context_with_gateway(gateway.clone()), gateway)
}

pub fn create_context_with_gateway(gateway: Arc<dyn BroadcastGateway>) -> PresenceContext {
    PresenceContext::new(
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(InMemoryRoomRepository::new()),
        Arc::new(InMemoryMessageRepository::new()),
        gateway,
        Arc::new(FixedClock::new("12:34")),
    )
}

pub fn connection(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn user(name: &str) -> UserName {
    UserName::new(name.to_string()).unwrap()
}

pub fn room_name(name: &str) -> RoomName {
    RoomName::new(name.to_string()).unwrap()
}

pub fn room_channel(name: &str) -> Channel {
    Channel::Room(room_name(name))
}

/// init 済みのセッションを作る（Gateway 呼び出しは記録しない）
pub async fn identify(ctx: &PresenceContext, id: &str, name: &str) {
    ctx.sessions
        .register(connection(id), user(name))
        .await
        .unwrap();
}

/// ルームを作り、指定の接続を入室済みにする（Gateway 呼び出しは記録しない）
pub async fn seat(ctx: &PresenceContext, id: &str, room: &str) {
    if ctx.rooms.find(&room_name(room)).await.is_err() {
        ctx.rooms
            .create(room_name(room), "12:00".to_string())
            .await
            .unwrap();
    }
    ctx.sessions
        .set_room(&connection(id), Some(room_name(room)))
        .await
        .unwrap();
    ctx.rooms
        .add_member(&room_name(room), connection(id))
        .await
        .unwrap();
}
