//! Command packet types carried by the relay.
//!
//! The core routes packets by their `application` field and nothing else:
//! `action`, `options`, `senderId`, and any other fields a controller sends
//! travel through the relay verbatim and uninspected.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ClientId;

/// An opaque unit of work addressed to one application.
///
/// Only `application` is typed; the rest of the JSON object is captured in
/// a flattened map so that a drain returns byte-equivalent packets to what
/// the producer posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommandPacket {
    /// Target application name, e.g. `"photoshop"`.
    pub application: String,

    /// Everything else in the packet (`action`, `options`, ...), untouched.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

/// The fan-out payload pushed to every endpoint registered for an
/// application.
///
/// `senderId` is stamped by the router from the submitting connection's
/// [`ClientId`]; receivers echo it back inside their response packets so
/// the relay can address the `packet_response` frame without tracking any
/// request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedPacket {
    /// Identity of the connection that submitted the command.
    #[serde(rename = "senderId")]
    pub sender_id: ClientId,

    /// Target application name.
    pub application: String,

    /// The command body, verbatim as submitted.
    pub command: serde_json::Value,
}
