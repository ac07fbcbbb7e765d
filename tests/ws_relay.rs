//! End-to-end scenarios for the WebSocket relay.

#![allow(clippy::panic)]

mod common;

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_test::assert_ok;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(addr: SocketAddr) -> WsClient {
    let (ws, _response) =
        tokio_test::assert_ok!(connect_async(format!("ws://{addr}/ws")).await);
    ws
}

async fn send_json(ws: &mut WsClient, frame: &Value) {
    tokio_test::assert_ok!(ws.send(Message::Text(frame.to_string().into())).await);
}

async fn recv_json(ws: &mut WsClient) -> Value {
    loop {
        let Some(msg) = ws.next().await else {
            panic!("connection closed while waiting for a frame");
        };
        if let Message::Text(text) = tokio_test::assert_ok!(msg) {
            return tokio_test::assert_ok!(serde_json::from_str(text.as_str()));
        }
    }
}

async fn register(ws: &mut WsClient, application: &str) {
    send_json(ws, &json!({"type": "register", "application": application})).await;
    let ack = recv_json(ws).await;
    assert_eq!(ack.get("type"), Some(&json!("registration")));
    assert_eq!(ack.get("status"), Some(&json!("success")));
}

async fn assert_silent(ws: &mut WsClient) {
    let waited = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(waited.is_err(), "expected no frame, got {waited:?}");
}

#[tokio::test]
async fn register_is_acknowledged() {
    let addr = common::spawn_server().await;
    let mut ws = connect(addr).await;

    send_json(&mut ws, &json!({"type": "register", "application": "photoshop"})).await;
    let ack = recv_json(&mut ws).await;

    assert_eq!(
        ack,
        json!({
            "type": "registration",
            "status": "success",
            "message": "Registered for photoshop"
        })
    );
}

#[tokio::test]
async fn fan_out_reaches_only_the_registered_application() {
    let addr = common::spawn_server().await;
    let mut s1 = connect(addr).await;
    let mut s2 = connect(addr).await;
    let mut sender = connect(addr).await;

    register(&mut s1, "photoshop").await;
    register(&mut s2, "illustrator").await;

    let command = json!({"action": "x", "options": {"radius": 4}});
    send_json(
        &mut sender,
        &json!({"type": "command_packet", "application": "photoshop", "command": command}),
    )
    .await;

    let routed = recv_json(&mut s1).await;
    assert_eq!(routed.get("type"), Some(&json!("command_packet")));
    assert_eq!(routed.get("application"), Some(&json!("photoshop")));
    assert_eq!(routed.get("command"), Some(&command));
    assert!(
        routed.get("senderId").and_then(Value::as_str).is_some(),
        "routed packet must carry the sender's id"
    );

    // The illustrator client and the submitter see nothing.
    assert_silent(&mut s2).await;
    assert_silent(&mut sender).await;
}

#[tokio::test]
async fn broadcast_reaches_every_endpoint_of_the_application() {
    let addr = common::spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    let mut sender = connect(addr).await;

    register(&mut a, "premiere").await;
    register(&mut b, "premiere").await;

    send_json(
        &mut sender,
        &json!({"type": "command_packet", "application": "premiere", "command": {"action": "addClip"}}),
    )
    .await;

    for ws in [&mut a, &mut b] {
        let routed = recv_json(ws).await;
        assert_eq!(routed.get("command"), Some(&json!({"action": "addClip"})));
    }
}

#[tokio::test]
async fn response_passes_through_to_the_original_sender() {
    let addr = common::spawn_server().await;
    let mut receiver = connect(addr).await;
    let mut sender = connect(addr).await;

    register(&mut receiver, "photoshop").await;

    send_json(
        &mut sender,
        &json!({"type": "command_packet", "application": "photoshop", "command": {"action": "x"}}),
    )
    .await;

    let routed = recv_json(&mut receiver).await;
    let Some(sender_id) = routed.get("senderId").cloned() else {
        panic!("routed packet must carry senderId");
    };

    // The receiver echoes the senderId back inside its response packet.
    let packet = json!({"senderId": sender_id, "status": "done", "result": {"layers": 3}});
    send_json(
        &mut receiver,
        &json!({"type": "command_packet_response", "packet": packet}),
    )
    .await;

    let forwarded = recv_json(&mut sender).await;
    assert_eq!(forwarded.get("type"), Some(&json!("packet_response")));
    assert_eq!(forwarded.get("packet"), Some(&packet));
}

#[tokio::test]
async fn disconnect_prunes_the_registration() {
    let addr = common::spawn_server().await;
    let mut s1 = connect(addr).await;
    let mut sender = connect(addr).await;

    register(&mut s1, "photoshop").await;
    tokio_test::assert_ok!(s1.close(None).await);
    drop(s1);
    // Let the server observe the close before the next command.
    tokio::time::sleep(Duration::from_millis(100)).await;

    // This command has no recipients and is dropped, not buffered.
    send_json(
        &mut sender,
        &json!({"type": "command_packet", "application": "photoshop", "command": {"action": "lost"}}),
    )
    .await;

    let mut s3 = connect(addr).await;
    register(&mut s3, "photoshop").await;
    send_json(
        &mut sender,
        &json!({"type": "command_packet", "application": "photoshop", "command": {"action": "second"}}),
    )
    .await;

    // The new registrant only sees the command sent after it registered.
    let routed = recv_json(&mut s3).await;
    assert_eq!(routed.get("command"), Some(&json!({"action": "second"})));
    assert_silent(&mut s3).await;
}

#[tokio::test]
async fn malformed_frame_gets_error_and_connection_survives() {
    let addr = common::spawn_server().await;
    let mut ws = connect(addr).await;

    tokio_test::assert_ok!(ws.send(Message::Text("not json".into())).await);
    let err = recv_json(&mut ws).await;
    assert_eq!(err.get("type"), Some(&json!("error")));

    // The connection is still usable afterwards.
    register(&mut ws, "photoshop").await;
}
