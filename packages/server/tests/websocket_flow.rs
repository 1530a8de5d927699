//! WebSocket end-to-end tests.

mod fixtures;

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use fixtures::{TestServer, WsClient, expect_event, next_event};
use futures_util::SinkExt;
use parlor_server::{
    ui::{AppState, build_router},
    usecase::PresenceSettings,
};
use tokio_tungstenite::tungstenite::Message;
use tower::ServiceExt;

async fn send(ws: &mut WsClient, frame: serde_json::Value) {
    ws.send(Message::Text(frame.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Identify, then wait for the room list refresh of a freshly created room.
async fn init_and_create(ws: &mut WsClient, name: &str, room: &str) {
    send(ws, serde_json::json!({"action": "init", "name": name})).await;
    send(ws, serde_json::json!({"action": "createRoom", "roomName": room})).await;
    expect_event(ws, "room").await;
}

#[tokio::test]
async fn test_duplicate_init_is_rejected() {
    // テスト項目: 使用中の名前で init すると rejected フレームが返る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut impostor = server.connect().await;
    init_and_create(&mut alice, "alice", "lobby").await;

    // when (操作):
    send(
        &mut impostor,
        serde_json::json!({"action": "init", "name": "alice"}),
    )
    .await;

    // then (期待する結果):
    let data = expect_event(&mut impostor, "rejected").await;
    assert_eq!(data, "nope");
}

#[tokio::test]
async fn test_chat_between_two_connections() {
    // テスト項目: 同じルームの参加者にメッセージが {sender, time, body} で届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    init_and_create(&mut alice, "alice", "lobby").await;
    send(&mut alice, serde_json::json!({"action": "enterRoom", "roomName": "lobby"})).await;
    expect_event(&mut alice, "message").await;
    send(&mut bob, serde_json::json!({"action": "init", "name": "bob"})).await;
    send(&mut bob, serde_json::json!({"action": "enterRoom", "roomName": "lobby"})).await;
    let joined = expect_event(&mut bob, "message").await;
    assert_eq!(joined["body"], "bob joined the room!");

    // when (操作):
    send(
        &mut alice,
        serde_json::json!({"action": "message", "name": "alice", "body": "hi bob"}),
    )
    .await;

    // then (期待する結果):
    let message = expect_event(&mut bob, "message").await;
    assert_eq!(message["sender"], "alice");
    assert_eq!(message["body"], "hi bob");
    assert_eq!(message["time"].as_str().unwrap().len(), 5);
}

#[tokio::test]
async fn test_unparseable_frame_is_ignored() {
    // テスト項目: 解析できないフレームは無視され、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;

    // when (操作):
    alice
        .send(Message::Text("not json".into()))
        .await
        .expect("Failed to send frame");
    send(&mut alice, serde_json::json!({"action": "dance"})).await;
    init_and_create(&mut alice, "alice", "lobby").await;

    // then (期待する結果):
    send(&mut alice, serde_json::json!({"action": "listRoom"})).await;
    let rooms = expect_event(&mut alice, "room").await;
    assert_eq!(rooms[0]["name"], "lobby");
}

#[tokio::test]
async fn test_typing_indicator_expires() {
    // テスト項目: インジケータが配信され、失効後に空文字列で消える
    // given (前提条件):
    let server = TestServer::start_with(PresenceSettings {
        indicator_expiry: Duration::from_millis(100),
    })
    .await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    init_and_create(&mut alice, "alice", "lobby").await;
    send(&mut alice, serde_json::json!({"action": "enterRoom", "roomName": "lobby"})).await;
    expect_event(&mut alice, "message").await;
    send(&mut bob, serde_json::json!({"action": "init", "name": "bob"})).await;
    send(&mut bob, serde_json::json!({"action": "enterRoom", "roomName": "lobby"})).await;
    expect_event(&mut bob, "message").await;

    // when (操作):
    send(
        &mut alice,
        serde_json::json!({"action": "externalAction", "kind": "typing"}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(
        expect_event(&mut bob, "externalAction").await,
        "alice is typing..."
    );
    assert_eq!(expect_event(&mut bob, "externalAction").await, "");
}

#[tokio::test]
async fn test_socket_close_leaves_room() {
    // テスト項目: ソケットを閉じると退出通知とルーム一覧が残りの参加者に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    init_and_create(&mut alice, "alice", "lobby").await;
    send(&mut alice, serde_json::json!({"action": "enterRoom", "roomName": "lobby"})).await;
    expect_event(&mut alice, "message").await;
    send(&mut bob, serde_json::json!({"action": "init", "name": "bob"})).await;
    send(&mut bob, serde_json::json!({"action": "enterRoom", "roomName": "lobby"})).await;
    expect_event(&mut bob, "message").await;
    expect_event(&mut bob, "room").await;

    // when (操作):
    alice.close(None).await.expect("Failed to close");

    // then (期待する結果):
    let left = expect_event(&mut bob, "message").await;
    assert_eq!(left["sender"], "system");
    assert_eq!(left["body"], "alice left the room!");
    let rooms = expect_event(&mut bob, "room").await;
    assert_eq!(rooms[0]["users"].as_array().unwrap().len(), 1);

    // 名前が解放され、再び init できる
    let mut again = server.connect().await;
    send(&mut again, serde_json::json!({"action": "init", "name": "alice"})).await;
    assert!(
        next_event(&mut again, Duration::from_millis(200))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_failed_upgrade_registers_no_connection() {
    // テスト項目: アップグレードが完了しなかった接続は ChannelHub に残らない
    // given (前提条件):
    let state = Arc::new(AppState::new(PresenceSettings::default()));
    let app = build_router(state.clone());
    let mut request = Request::builder()
        .method("GET")
        .uri("/ws")
        .header(header::CONNECTION, "upgrade")
        .header(header::UPGRADE, "websocket")
        .header(header::SEC_WEBSOCKET_VERSION, "13")
        .header(header::SEC_WEBSOCKET_KEY, "dGhlIHNhbXBsZSBub25jZQ==")
        .body(Body::empty())
        .unwrap();
    // Not served over a real connection, so the upgrade never completes
    let on_upgrade = hyper::upgrade::on(&mut Request::new(Body::empty()));
    request.extensions_mut().insert(on_upgrade);

    // when (操作):
    let response = app.oneshot(request).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::SWITCHING_PROTOCOLS);
    assert_eq!(state.hub.connection_count().await, 0);
}

#[tokio::test]
async fn test_closed_socket_is_unregistered() {
    // テスト項目: ソケットを閉じると ChannelHub から接続が消える
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    init_and_create(&mut alice, "alice", "lobby").await;
    assert_eq!(server.state().hub.connection_count().await, 1);

    // when (操作):
    alice.close(None).await.expect("Failed to close");

    // then (期待する結果):
    let mut remaining = 1;
    for _ in 0..50 {
        remaining = server.state().hub.connection_count().await;
        if remaining == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(remaining, 0);
}
