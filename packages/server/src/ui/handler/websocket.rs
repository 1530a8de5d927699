//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::{ClientAction, ServerEvent},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to generate connection id: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    // Create a channel for this connection to receive frames
    let (tx, mut rx) = mpsc::unbounded_channel();
    state.hub.connect(connection_id.clone(), tx).await;
    tracing::info!("Connection '{}' accepted", connection_id);

    let (mut sender, mut receiver) = socket.split();

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    // Spawn a task to receive action frames from this connection.
    // It only stops between frames, never while an action is running.
    let mut recv_task = tokio::spawn(async move {
        loop {
            let msg = tokio::select! {
                _ = &mut stop_rx => break,
                msg = receiver.next() => msg,
            };
            let Some(msg) = msg else { break };
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received frame from '{}': {}", connection_id_clone, text);
                    match serde_json::from_str::<ClientAction>(&text) {
                        Ok(action) => {
                            handle_action(&state_clone, &connection_id_clone, action).await;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring unparseable frame from '{}': {}",
                                connection_id_clone,
                                e
                            );
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push broadcast frames to this connection
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, stop the other
    let send_finished = tokio::select! {
        _ = &mut recv_task => false,
        _ = &mut send_task => true,
    };
    if send_finished {
        let _ = stop_tx.send(());
        if let Err(e) = recv_task.await {
            tracing::warn!("Receive task for '{}' failed: {}", connection_id, e);
        }
    } else {
        send_task.abort();
    }

    // Never identified: nothing to clean up besides the socket
    if state.engine.disconnect(&connection_id).await.is_err() {
        tracing::info!("Anonymous connection '{}' closed", connection_id);
    }
    state.hub.disconnect(&connection_id).await;
}

/// Route one inbound action to the engine. Refusals are absorbed.
async fn handle_action(state: &AppState, connection_id: &ConnectionId, action: ClientAction) {
    let engine = &state.engine;
    match action {
        ClientAction::Init { name } => {
            if let Err(e) = engine.init(connection_id, name).await {
                tracing::warn!("Rejected init from '{}': {}", connection_id, e);
                if !state.hub.send_to(connection_id, &ServerEvent::rejected()).await {
                    tracing::warn!("Failed to send rejection to '{}'", connection_id);
                }
            }
        }
        ClientAction::Message { name, body } => {
            let _ = engine.message(connection_id, name, body).await;
        }
        ClientAction::EnterRoom { room_name } => {
            let _ = engine.enter_room(connection_id, room_name).await;
        }
        ClientAction::LeaveRoom { room_name } => {
            let _ = engine.leave_room(connection_id, room_name).await;
        }
        ClientAction::CreateRoom { room_name } => {
            let _ = engine.create_room(connection_id, room_name).await;
        }
        ClientAction::ListRoom => {
            engine.list_rooms(connection_id).await;
        }
        ClientAction::ExternalAction { kind } => {
            let _ = engine.external_action(connection_id, kind).await;
        }
    }
}
