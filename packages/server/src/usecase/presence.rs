//! Presence Engine: the action boundary.
//!
//! Every inbound action runs under one ordering lock, so the sequence "read
//! membership → write membership → broadcast" of one action is never
//! interleaved with another. Raw client parameters are validated here; each
//! refusal is logged and returned as a `PresenceError` that the transport
//! layer absorbs.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ConnectionId, MessageBody, PresenceState, Room, RoomName, Session, UserName,
};

use super::{
    command::{CommandDispatcher, DispatchOutcome},
    context::PresenceContext,
    create_room::CreateRoomUseCase,
    disconnect::DisconnectUseCase,
    enter_room::EnterRoomUseCase,
    error::PresenceError,
    external_action::{
        DEFAULT_INDICATOR_EXPIRY, ExternalActionKind, ExternalActionUseCase, IndicatorTimers,
    },
    init_session::InitSessionUseCase,
    leave_room::LeaveRoomUseCase,
    list_rooms::ListRoomsUseCase,
    send_message::SendMessageUseCase,
};

/// Tunables of the presence engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceSettings {
    /// How long an activity indicator stays up without a refresh
    pub indicator_expiry: Duration,
}

impl Default for PresenceSettings {
    fn default() -> Self {
        Self {
            indicator_expiry: DEFAULT_INDICATOR_EXPIRY,
        }
    }
}

/// Result of a `message` action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Plain text appended to the log and broadcast
    Posted(ChatMessage),
    /// Slash-command routed through the dispatcher
    Command(DispatchOutcome),
}

struct EngineState {
    ctx: PresenceContext,
    commands: CommandDispatcher,
    indicators: IndicatorTimers,
    action_lock: Mutex<()>,
}

/// Entry point for every inbound action.
///
/// Each action runs to completion on its own task: dropping the returned
/// future (a socket torn down mid-action) never leaves the Session Registry
/// and Room Directory half-updated.
pub struct PresenceEngine {
    state: Arc<EngineState>,
}

impl PresenceEngine {
    /// Engine with the built-in commands.
    pub fn new(ctx: PresenceContext, settings: PresenceSettings) -> Self {
        Self::with_commands(ctx, settings, CommandDispatcher::with_builtin_commands())
    }

    pub fn with_commands(
        ctx: PresenceContext,
        settings: PresenceSettings,
        commands: CommandDispatcher,
    ) -> Self {
        let indicators = IndicatorTimers::new(ctx.gateway.clone(), settings.indicator_expiry);
        Self {
            state: Arc::new(EngineState {
                ctx,
                commands,
                indicators,
                action_lock: Mutex::new(()),
            }),
        }
    }

    pub fn context(&self) -> &PresenceContext {
        &self.state.ctx
    }

    pub async fn presence_state(&self, connection_id: &ConnectionId) -> PresenceState {
        let _guard = self.state.action_lock.lock().await;
        self.state.ctx.presence_state(connection_id).await
    }

    /// Rooms with an armed indicator expiry timer.
    pub async fn pending_indicators(&self) -> usize {
        self.state.indicators.pending_count().await
    }

    pub async fn init(
        &self,
        connection_id: &ConnectionId,
        name: String,
    ) -> Result<Session, PresenceError> {
        let connection_id = connection_id.clone();
        self.run("init", connection_id.clone(), move |ctx| async move {
            let name = UserName::new(name)?;
            InitSessionUseCase::new(ctx).execute(connection_id, name).await
        })
        .await
    }

    pub async fn create_room(
        &self,
        connection_id: &ConnectionId,
        room_name: String,
    ) -> Result<Room, PresenceError> {
        let connection_id = connection_id.clone();
        self.run("createRoom", connection_id.clone(), move |ctx| async move {
            let room_name = RoomName::new(room_name)?;
            CreateRoomUseCase::new(ctx)
                .execute(&connection_id, room_name)
                .await
        })
        .await
    }

    pub async fn enter_room(
        &self,
        connection_id: &ConnectionId,
        room_name: String,
    ) -> Result<ChatMessage, PresenceError> {
        let connection_id = connection_id.clone();
        self.run("enterRoom", connection_id.clone(), move |ctx| async move {
            let room_name = RoomName::new(room_name)?;
            EnterRoomUseCase::new(ctx)
                .execute(&connection_id, room_name)
                .await
        })
        .await
    }

    pub async fn leave_room(
        &self,
        connection_id: &ConnectionId,
        room_name: String,
    ) -> Result<ChatMessage, PresenceError> {
        let connection_id = connection_id.clone();
        self.run("leaveRoom", connection_id.clone(), move |ctx| async move {
            let room_name = RoomName::new(room_name)?;
            LeaveRoomUseCase::new(ctx)
                .execute(&connection_id, &room_name)
                .await
        })
        .await
    }

    /// Post chat text, or route a `/command` through the dispatcher.
    pub async fn message(
        &self,
        connection_id: &ConnectionId,
        name: String,
        body: String,
    ) -> Result<MessageOutcome, PresenceError> {
        let state = self.state.clone();
        let connection_id = connection_id.clone();
        self.run("message", connection_id.clone(), move |ctx| async move {
            let body = MessageBody::new(body)?;
            if body.is_command() {
                let requester = ctx.require_session(&connection_id).await?;
                let outcome = state
                    .commands
                    .dispatch(&ctx, &requester, body.as_str())
                    .await?;
                return Ok(MessageOutcome::Command(outcome));
            }
            let name = UserName::new(name)?;
            let message = SendMessageUseCase::new(ctx)
                .execute(&connection_id, name, body)
                .await?;
            Ok::<_, PresenceError>(MessageOutcome::Posted(message))
        })
        .await
    }

    /// Re-broadcast the room directory to `system`.
    pub async fn list_rooms(&self, connection_id: &ConnectionId) -> Vec<Room> {
        tracing::debug!("Room list requested by '{}'", connection_id);
        let result = self
            .run("listRoom", connection_id.clone(), |ctx| async move {
                Ok::<_, PresenceError>(ListRoomsUseCase::new(ctx).execute().await)
            })
            .await;
        result.unwrap_or_default()
    }

    pub async fn external_action(
        &self,
        connection_id: &ConnectionId,
        kind: String,
    ) -> Result<String, PresenceError> {
        let state = self.state.clone();
        let connection_id = connection_id.clone();
        self.run("externalAction", connection_id.clone(), move |ctx| async move {
            ExternalActionUseCase::new(ctx, &state.indicators)
                .execute(&connection_id, ExternalActionKind::parse(&kind))
                .await
        })
        .await
    }

    pub async fn disconnect(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<ChatMessage>, PresenceError> {
        let connection_id = connection_id.clone();
        self.run("disconnect", connection_id.clone(), move |ctx| async move {
            DisconnectUseCase::new(ctx).execute(&connection_id).await
        })
        .await
    }

    /// Run one action under the ordering lock on a task of its own.
    async fn run<T, F, Fut>(
        &self,
        action: &'static str,
        connection_id: ConnectionId,
        body: F,
    ) -> Result<T, PresenceError>
    where
        T: Send + 'static,
        F: FnOnce(PresenceContext) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, PresenceError>> + Send + 'static,
    {
        let state = self.state.clone();
        let task = tokio::spawn(async move {
            let _guard = state.action_lock.lock().await;
            let result = body(state.ctx.clone()).await;
            log_refusal(action, &connection_id, result)
        });
        match task.await {
            Ok(result) => result,
            // The task is never aborted, so the only failure is a panic
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

fn log_refusal<T>(
    action: &str,
    connection_id: &ConnectionId,
    result: Result<T, PresenceError>,
) -> Result<T, PresenceError> {
    if let Err(e) = &result {
        tracing::debug!("{} from '{}' ignored: {}", action, connection_id, e);
    }
    result
}
