//! UseCase: 入力中・操作中インジケータ（externalAction）
//!
//! インジケータは保存されない一時的な配信です。ルームごとに 1 つの失効タイマーを
//! 持ち、再度アームすると前のタイマーは取り消されます（デバウンス）。
//! 失効すると空文字列を配信してインジケータを消し、自分自身を解除します。

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::Mutex, task::JoinHandle};

use crate::domain::{
    BroadcastGateway, Channel, ConnectionId, OutboundEvent, RoomName, UserName,
};

use super::{context::PresenceContext, error::PresenceError};

/// Default lifetime of an indicator before it is cleared
pub const DEFAULT_INDICATOR_EXPIRY: Duration = Duration::from_secs(1);

/// Kind of activity a client reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalActionKind {
    Typing,
    Other(String),
}

impl ExternalActionKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "typing" => ExternalActionKind::Typing,
            other => ExternalActionKind::Other(other.to_string()),
        }
    }

    /// Status line shown to the rest of the room
    pub fn describe(&self, name: &UserName) -> String {
        match self {
            ExternalActionKind::Typing => format!("{name} is typing..."),
            ExternalActionKind::Other(_) => format!("{name} is acting..."),
        }
    }
}

struct PendingExpiry {
    generation: u64,
    handle: JoinHandle<()>,
}

/// One debounced expiry timer per room
pub struct IndicatorTimers {
    gateway: Arc<dyn BroadcastGateway>,
    expiry: Duration,
    pending: Arc<Mutex<HashMap<RoomName, PendingExpiry>>>,
    next_generation: AtomicU64,
}

impl IndicatorTimers {
    pub fn new(gateway: Arc<dyn BroadcastGateway>, expiry: Duration) -> Self {
        Self {
            gateway,
            expiry,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Broadcast a status to a room and arm (or re-arm) its expiry timer,
    /// cancelling the pending one.
    ///
    /// The status goes out under the same lock the expiry clears with, so a
    /// clear never lands after a newer status.
    pub async fn arm(&self, room: RoomName, status: String) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.remove(&room) {
            previous.handle.abort();
            tracing::debug!("Indicator timer for room '{}' re-armed", room);
        }
        self.gateway
            .broadcast(
                &Channel::Room(room.clone()),
                OutboundEvent::ExternalAction(status),
            )
            .await;

        let handle = tokio::spawn(expire(
            self.pending.clone(),
            self.gateway.clone(),
            room.clone(),
            generation,
            self.expiry,
        ));
        pending.insert(room, PendingExpiry { generation, handle });
    }

    /// Number of rooms with an armed timer.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}

impl Drop for IndicatorTimers {
    fn drop(&mut self) {
        if let Ok(pending) = self.pending.try_lock() {
            for entry in pending.values() {
                entry.handle.abort();
            }
        }
    }
}

async fn expire(
    pending: Arc<Mutex<HashMap<RoomName, PendingExpiry>>>,
    gateway: Arc<dyn BroadcastGateway>,
    room: RoomName,
    generation: u64,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;
    let mut pending = pending.lock().await;
    // A newer arm owns the slot
    match pending.get(&room) {
        Some(entry) if entry.generation == generation => {
            pending.remove(&room);
        }
        _ => return,
    }
    gateway
        .broadcast(&Channel::Room(room), OutboundEvent::ExternalAction(String::new()))
        .await;
}

/// インジケータ配信のユースケース
pub struct ExternalActionUseCase<'a> {
    ctx: PresenceContext,
    timers: &'a IndicatorTimers,
}

impl<'a> ExternalActionUseCase<'a> {
    /// 新しい ExternalActionUseCase を作成
    pub fn new(ctx: PresenceContext, timers: &'a IndicatorTimers) -> Self {
        Self { ctx, timers }
    }

    /// インジケータを現在のルームに配信し、失効タイマーをアームする
    ///
    /// # Errors
    ///
    /// * `UnauthorizedState` - init 前、またはルームにいない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        kind: ExternalActionKind,
    ) -> Result<String, PresenceError> {
        let session = self.ctx.require_session(connection_id).await?;
        let room = session.room.ok_or_else(|| {
            PresenceError::UnauthorizedState(format!("'{}' is not in a room", session.name))
        })?;

        let status = kind.describe(&session.name);
        self.timers.arm(room, status.clone()).await;

        Ok(status)
    }
}
