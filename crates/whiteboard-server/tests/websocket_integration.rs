//! Integration tests for the websocket driver.
//!
//! These bind a real `TcpListener`, serve the real [`whiteboard_server::app`]
//! router, and drive it with a real `tokio-tungstenite` client, exercising
//! frame decode, JOIN/LEAVE dispatch, and event broadcast end to end rather
//! than through in-process `Hub` calls.

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use whiteboard_core::CoreConfig;
use whiteboard_server::{ConnectionTimings, Hub};

async fn start_server() -> String {
    let hub = Arc::new(Hub::new(CoreConfig::default()));
    let timings = ConnectionTimings { heartbeat: Duration::from_secs(30), idle_timeout: Duration::from_secs(10) };
    let app = whiteboard_server::app(hub, timings);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("ws://{addr}/ws")
}

async fn recv_json(socket: &mut tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>) -> Value {
    loop {
        match socket.next().await.unwrap().unwrap() {
            Message::Text(text) => return serde_json::from_str(&text).unwrap(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected message: {other:?}"),
        }
    }
}

#[tokio::test]
async fn connecting_sends_a_connected_frame() {
    let addr = start_server().await;
    let (mut socket, _) = tokio_tungstenite::connect_async(addr).await.unwrap();

    let frame = recv_json(&mut socket).await;
    assert_eq!(frame["type"], "CONNECTED");
    assert!(frame["sessionId"].is_string());
}

#[tokio::test]
async fn join_room_then_draw_is_broadcast_back() {
    let addr = start_server().await;
    let (mut socket, _) = tokio_tungstenite::connect_async(addr).await.unwrap();
    recv_json(&mut socket).await; // CONNECTED

    socket
        .send(Message::Text(json!({"type": "JOIN_ROOM", "userId": "u1", "roomId": "r1"}).to_string().into()))
        .await
        .unwrap();
    let joined = recv_json(&mut socket).await;
    assert_eq!(joined["type"], "ROOM_JOINED");
    assert_eq!(joined["roomId"], "r1");

    socket
        .send(
            Message::Text(
                json!({
                    "type": "DRAW_LINE",
                    "userId": "u1",
                    "points": [[0.0, 0.0], [1.0, 1.0]],
                    "color": "#FF0000",
                    "strokeWidth": 2.0,
                })
                .to_string()
                .into(),
            ),
        )
        .await
        .unwrap();

    let event = recv_json(&mut socket).await;
    assert_eq!(event["type"], "DRAW_LINE");
    assert_eq!(event["sequence"], 1);
}

#[tokio::test]
async fn drawing_without_joining_a_room_gets_an_error() {
    let addr = start_server().await;
    let (mut socket, _) = tokio_tungstenite::connect_async(addr).await.unwrap();
    recv_json(&mut socket).await; // CONNECTED

    socket
        .send(Message::Text(
            json!({"type": "CLEAR_CANVAS", "userId": "u1"}).to_string().into(),
        ))
        .await
        .unwrap();

    let error = recv_json(&mut socket).await;
    assert_eq!(error["type"], "ERROR");
    assert_eq!(error["error"], "Not in a room");
}

#[tokio::test]
async fn joining_an_empty_room_id_gets_an_error() {
    let addr = start_server().await;
    let (mut socket, _) = tokio_tungstenite::connect_async(addr).await.unwrap();
    recv_json(&mut socket).await; // CONNECTED

    socket
        .send(Message::Text(json!({"type": "JOIN_ROOM", "userId": "u1", "roomId": ""}).to_string().into()))
        .await
        .unwrap();

    let error = recv_json(&mut socket).await;
    assert_eq!(error["type"], "ERROR");
}

#[tokio::test]
async fn malformed_json_gets_a_fixed_error_message() {
    let addr = start_server().await;
    let (mut socket, _) = tokio_tungstenite::connect_async(addr).await.unwrap();
    recv_json(&mut socket).await; // CONNECTED

    socket.send(Message::Text("not json at all".into())).await.unwrap();

    let error = recv_json(&mut socket).await;
    assert_eq!(error["type"], "ERROR");
    assert_eq!(error["error"], "Invalid message format");
}

#[tokio::test]
async fn two_sessions_in_the_same_room_both_see_the_broadcast() {
    let addr = start_server().await;
    let (mut a, _) = tokio_tungstenite::connect_async(&addr).await.unwrap();
    let (mut b, _) = tokio_tungstenite::connect_async(&addr).await.unwrap();
    recv_json(&mut a).await;
    recv_json(&mut b).await;

    a.send(Message::Text(json!({"type": "JOIN_ROOM", "userId": "u1", "roomId": "shared"}).to_string().into()))
        .await
        .unwrap();
    recv_json(&mut a).await; // ROOM_JOINED
    b.send(Message::Text(json!({"type": "JOIN_ROOM", "userId": "u2", "roomId": "shared"}).to_string().into()))
        .await
        .unwrap();
    recv_json(&mut b).await; // ROOM_JOINED

    a.send(Message::Text(json!({"type": "CLEAR_CANVAS", "userId": "u1"}).to_string().into())).await.unwrap();

    let seen_by_a = recv_json(&mut a).await;
    let seen_by_b = recv_json(&mut b).await;
    assert_eq!(seen_by_a["type"], "CLEAR_CANVAS");
    assert_eq!(seen_by_b["type"], "CLEAR_CANVAS");
}
