//! WebSocket connection state machine.
//!
//! Runs the read/write loop for a single connection: inbound frames are
//! dispatched to the [`RelayService`], outbound deliveries from the
//! relay are forwarded to the socket. When the loop exits, for any
//! reason, the connection is torn down exactly once.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use super::messages::{ClientMessage, ServerMessage};
use crate::domain::{ClientId, Delivery};
use crate::service::RelayService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads frames from the client and dispatches them to the relay.
/// - Forwards [`Delivery`] frames from the relay to the client.
/// - Calls [`RelayService::disconnect`] exactly once on exit, whether
///   the connection closed cleanly, errored, or vanished.
pub async fn run_connection(socket: WebSocket, relay: Arc<RelayService>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (client, mut deliveries) = relay.connect().await;

    loop {
        tokio::select! {
            // Incoming frame from the client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(&relay, client, &text).await;
                        if let Some(json) = reply
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
            // Outbound delivery from the relay
            delivery = deliveries.recv() => {
                let Some(delivery) = delivery else {
                    break;
                };
                let frame = match delivery {
                    Delivery::Command(packet) => ServerMessage::CommandPacket(packet),
                    Delivery::Response(packet) => ServerMessage::PacketResponse { packet },
                };
                let json = serde_json::to_string(&frame).unwrap_or_default();
                if ws_tx.send(Message::text(json)).await.is_err() {
                    break;
                }
            }
        }
    }

    relay.disconnect(client).await;
}

/// Dispatches one text frame, returning an optional JSON reply for the
/// offending or registering client only.
async fn handle_text_message(
    relay: &RelayService,
    client: ClientId,
    text: &str,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<ClientMessage>(text) else {
        let err = ServerMessage::Error {
            message: "malformed or unrecognized frame".to_string(),
        };
        return serde_json::to_string(&err).ok();
    };

    match msg {
        ClientMessage::Register { application } => {
            relay.register(client, &application).await;
            let ack = ServerMessage::registered(&application);
            serde_json::to_string(&ack).ok()
        }
        ClientMessage::CommandPacket {
            application,
            command,
        } => {
            // Fire-and-forget: the outcome is logged, the submitter gets
            // no reply either way.
            let outcome = relay.deliver_command(client, &application, command).await;
            tracing::debug!(%client, application, ?outcome, "command packet handled");
            None
        }
        ClientMessage::CommandPacketResponse { packet } => {
            if let Err(err) = relay.forward_response(packet).await {
                tracing::warn!(%client, %err, "response packet dropped");
            }
            None
        }
    }
}
