//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::StreamExt;
use parlor_server::{
    ui::{AppState, serve},
    usecase::PresenceSettings,
};
use tokio::{net::TcpListener, sync::oneshot, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Server bound to an ephemeral port, stopped on drop
pub struct TestServer {
    addr: SocketAddr,
    state: Arc<AppState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(PresenceSettings::default()).await
    }

    pub async fn start_with(settings: PresenceSettings) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let state = Arc::new(AppState::new(settings));

        let served = state.clone();
        tokio::spawn(async move {
            serve(listener, served, async {
                let _ = shutdown_rx.await;
            })
            .await
            .ok();
        });

        let server = Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
        };
        server.wait_until_healthy().await;
        server
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> WsClient {
        let (ws, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        ws
    }

    async fn wait_until_healthy(&self) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if let Ok(response) = client
                .get(format!("{}/api/health", self.base_url()))
                .send()
                .await
                && response.status().is_success()
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Test server did not become healthy");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Next text frame parsed as JSON, or `None` after `wait`.
pub async fn next_event(ws: &mut WsClient, wait: Duration) -> Option<serde_json::Value> {
    loop {
        let frame = timeout(wait, ws.next()).await.ok()??.ok()?;
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).ok();
        }
    }
}

/// Read frames until one matches `event`, skipping others.
pub async fn expect_event(ws: &mut WsClient, event: &str) -> serde_json::Value {
    loop {
        let value = next_event(ws, Duration::from_secs(2))
            .await
            .unwrap_or_else(|| panic!("Timed out waiting for '{event}'"));
        if value["event"] == event {
            return value["data"].clone();
        }
    }
}
