//! Relay service: connection directory, fan-out, and response forwarding.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use crate::domain::{ClientId, ClientRegistry, Delivery, DeliveryOutcome, RoutedPacket};
use crate::error::RelayError;

/// Orchestration layer for the live push path.
///
/// Owns the directory from [`ClientId`] to each connection's outbound
/// channel, and a reference to the [`ClientRegistry`] for addressing.
/// Every push is fire-and-forget: channels are unbounded, sends never
/// suspend, and a send losing the race to a disconnect is dropped
/// silently.
#[derive(Debug)]
pub struct RelayService {
    registry: Arc<ClientRegistry>,
    connections: RwLock<HashMap<ClientId, mpsc::UnboundedSender<Delivery>>>,
}

impl RelayService {
    /// Creates a new `RelayService` over the given registry.
    #[must_use]
    pub fn new(registry: Arc<ClientRegistry>) -> Self {
        Self {
            registry,
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Returns a reference to the inner [`ClientRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<ClientRegistry> {
        &self.registry
    }

    /// Admits a new connection: mints a [`ClientId`] and hands back the
    /// receiver half of its outbound channel.
    ///
    /// The caller (the WebSocket task) owns the receiver and forwards its
    /// frames to the socket until [`disconnect`](Self::disconnect).
    pub async fn connect(&self) -> (ClientId, mpsc::UnboundedReceiver<Delivery>) {
        let client = ClientId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.write().await.insert(client, tx);
        tracing::info!(%client, "client connected");
        (client, rx)
    }

    /// Binds `client` to `application`, replacing any previous binding.
    pub async fn register(&self, client: ClientId, application: &str) {
        self.registry.register(client, application).await;
        tracing::info!(%client, application, "client registered");
    }

    /// Fans `command` out to every endpoint registered for `application`.
    ///
    /// The routed packet carries the submitting connection's id as
    /// `senderId` so receivers can address their responses. The reported
    /// recipient count is the size of the registry snapshot; an endpoint
    /// disconnecting mid-fan-out loses its copy without error.
    pub async fn deliver_command(
        &self,
        sender: ClientId,
        application: &str,
        command: serde_json::Value,
    ) -> DeliveryOutcome {
        let endpoints = self.registry.endpoints(application).await;
        if endpoints.is_empty() {
            tracing::warn!(application, "no clients registered for application");
            return DeliveryOutcome::NoRecipients;
        }

        let packet = RoutedPacket {
            sender_id: sender,
            application: application.to_string(),
            command,
        };

        let recipients = endpoints.len();
        let connections = self.connections.read().await;
        for endpoint in endpoints {
            if let Some(tx) = connections.get(&endpoint) {
                let _ = tx.send(Delivery::Command(packet.clone()));
            }
        }

        tracing::info!(application, recipients, "command delivered");
        DeliveryOutcome::Delivered { recipients }
    }

    /// Forwards a response packet verbatim to the client named by its
    /// `senderId` field.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MissingSenderId`] when the packet has no
    /// parseable `senderId`, or [`RelayError::ClientNotConnected`] when
    /// the named sender has already gone away.
    pub async fn forward_response(&self, packet: serde_json::Value) -> Result<(), RelayError> {
        let sender = packet
            .get("senderId")
            .and_then(serde_json::Value::as_str)
            .and_then(|raw| raw.parse::<uuid::Uuid>().ok())
            .map(ClientId::from_uuid)
            .ok_or(RelayError::MissingSenderId)?;

        let connections = self.connections.read().await;
        let tx = connections
            .get(&sender)
            .ok_or(RelayError::ClientNotConnected(sender))?;
        tx.send(Delivery::Response(packet))
            .map_err(|_| RelayError::ClientNotConnected(sender))?;

        tracing::debug!(%sender, "response forwarded");
        Ok(())
    }

    /// Tears down `client`: drops its directory entry and registry
    /// binding.
    ///
    /// Called exactly once per connection close by the WebSocket task,
    /// whether or not the client ever registered. Safe against a
    /// concurrent fan-out: the fan-out iterates a registry snapshot and
    /// its send to this client simply fails.
    pub async fn disconnect(&self, client: ClientId) {
        self.connections.write().await.remove(&client);
        self.registry.unregister(client).await;
        tracing::info!(%client, "client disconnected");
    }

    /// Returns the number of currently connected clients.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;
    use serde_json::json;

    fn make_service() -> RelayService {
        RelayService::new(Arc::new(ClientRegistry::new()))
    }

    #[tokio::test]
    async fn deliver_reaches_only_the_target_application() {
        let service = make_service();
        let (ps_client, mut ps_rx) = service.connect().await;
        let (ai_client, mut ai_rx) = service.connect().await;
        let (sender, _sender_rx) = service.connect().await;

        service.register(ps_client, "photoshop").await;
        service.register(ai_client, "illustrator").await;

        let outcome = service
            .deliver_command(sender, "photoshop", json!({"action": "x"}))
            .await;
        assert_eq!(outcome, DeliveryOutcome::Delivered { recipients: 1 });

        let Some(Delivery::Command(packet)) = ps_rx.recv().await else {
            panic!("expected a routed command");
        };
        assert_eq!(packet.sender_id, sender);
        assert_eq!(packet.application, "photoshop");
        assert_eq!(packet.command, json!({"action": "x"}));

        // The illustrator client must see nothing.
        assert!(ai_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn deliver_fans_out_to_every_registered_endpoint() {
        let service = make_service();
        let (a, mut a_rx) = service.connect().await;
        let (b, mut b_rx) = service.connect().await;
        let (sender, _sender_rx) = service.connect().await;

        service.register(a, "photoshop").await;
        service.register(b, "photoshop").await;

        let outcome = service
            .deliver_command(sender, "photoshop", json!({"action": "fillLayer"}))
            .await;
        assert_eq!(outcome, DeliveryOutcome::Delivered { recipients: 2 });

        for rx in [&mut a_rx, &mut b_rx] {
            let Some(Delivery::Command(packet)) = rx.recv().await else {
                panic!("expected a routed command");
            };
            assert_eq!(packet.command, json!({"action": "fillLayer"}));
        }
    }

    #[tokio::test]
    async fn deliver_without_recipients_drops_the_packet() {
        let service = make_service();
        let (sender, _sender_rx) = service.connect().await;

        let outcome = service
            .deliver_command(sender, "photoshop", json!({"action": "x"}))
            .await;
        assert_eq!(outcome, DeliveryOutcome::NoRecipients);
    }

    #[tokio::test]
    async fn disconnect_makes_later_delivery_fail() {
        let service = make_service();
        let (client, _rx) = service.connect().await;
        let (sender, _sender_rx) = service.connect().await;
        service.register(client, "photoshop").await;

        service.disconnect(client).await;

        let outcome = service
            .deliver_command(sender, "photoshop", json!({"action": "x"}))
            .await;
        assert_eq!(outcome, DeliveryOutcome::NoRecipients);
    }

    #[tokio::test]
    async fn sender_role_never_needs_to_register() {
        let service = make_service();
        let (receiver, mut rx) = service.connect().await;
        let (sender, _sender_rx) = service.connect().await;
        service.register(receiver, "premiere").await;

        // The sender submits without ever registering.
        let outcome = service
            .deliver_command(sender, "premiere", json!({"action": "addClip"}))
            .await;
        assert!(outcome.is_delivered());
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn response_is_forwarded_to_the_named_sender() {
        let service = make_service();
        let (sender, mut sender_rx) = service.connect().await;

        let packet = json!({"senderId": sender.to_string(), "status": "done"});
        tokio_test::assert_ok!(service.forward_response(packet.clone()).await);

        let Some(Delivery::Response(forwarded)) = sender_rx.recv().await else {
            panic!("expected a forwarded response");
        };
        assert_eq!(forwarded, packet);
    }

    #[tokio::test]
    async fn response_without_sender_id_is_an_error() {
        let service = make_service();
        let result = service.forward_response(json!({"status": "done"})).await;
        let Err(RelayError::MissingSenderId) = result else {
            panic!("expected MissingSenderId");
        };
    }

    #[tokio::test]
    async fn response_to_departed_sender_is_an_error() {
        let service = make_service();
        let (sender, _rx) = service.connect().await;
        service.disconnect(sender).await;

        let packet = json!({"senderId": sender.to_string()});
        let result = service.forward_response(packet).await;
        let Err(RelayError::ClientNotConnected(id)) = result else {
            panic!("expected ClientNotConnected");
        };
        assert_eq!(id, sender);
    }

    #[tokio::test]
    async fn connection_count_tracks_lifecycle() {
        let service = make_service();
        assert_eq!(service.connection_count().await, 0);

        let (client, _rx) = service.connect().await;
        assert_eq!(service.connection_count().await, 1);

        service.disconnect(client).await;
        assert_eq!(service.connection_count().await, 0);
    }
}
