//! WebSocket message types: inbound client frames and outbound server
//! frames.
//!
//! JSON text frames discriminated by a `type` field. The tag names are
//! the wire contract the deployed plugins speak; the `command` and
//! `packet` payloads are opaque [`serde_json::Value`]s the relay never
//! inspects.

use serde::{Deserialize, Serialize};

use crate::domain::RoutedPacket;

/// Frames a client can send to the relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Bind this connection to an application.
    Register {
        /// Application name to register for.
        application: String,
    },

    /// Submit a command for fan-out to an application's endpoints.
    CommandPacket {
        /// Target application name.
        application: String,
        /// Opaque command body, routed verbatim.
        command: serde_json::Value,
    },

    /// Report an execution result back to the original sender.
    CommandPacketResponse {
        /// Opaque response packet; its `senderId` field addresses it.
        packet: serde_json::Value,
    },
}

/// Frames the relay pushes to a client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Acknowledgement of a `register` frame.
    Registration {
        /// Always `"success"`; registration has no failure path.
        status: String,
        /// Human-readable confirmation.
        message: String,
    },

    /// A routed command for an endpoint registered to its application.
    ///
    /// Internally tagged, so the wire frame is the stamped
    /// `{senderId, application, command}` payload plus the `type` field.
    CommandPacket(RoutedPacket),

    /// A response packet forwarded to its original sender.
    PacketResponse {
        /// The response packet, verbatim as submitted.
        packet: serde_json::Value,
    },

    /// A malformed or unroutable frame was received.
    Error {
        /// What was wrong with the frame.
        message: String,
    },
}

impl ServerMessage {
    /// Builds the registration acknowledgement for `application`.
    #[must_use]
    pub fn registered(application: &str) -> Self {
        Self::Registration {
            status: "success".to_string(),
            message: format!("Registered for {application}"),
        }
    }
}
