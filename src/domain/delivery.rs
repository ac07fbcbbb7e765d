//! Frames pushed from the relay core to individual connections, and the
//! result vocabulary of a fan-out attempt.

use super::RoutedPacket;

/// One frame addressed to one connected client.
///
/// These travel over each connection's outbound channel; the WebSocket
/// layer turns them into wire messages. Sends are fire-and-forget: a frame
/// addressed to a connection that is going away is dropped without error.
#[derive(Debug, Clone)]
pub enum Delivery {
    /// A routed command packet for an endpoint registered to its
    /// application.
    Command(RoutedPacket),

    /// A response packet forwarded verbatim to the original sender.
    Response(serde_json::Value),
}

/// Result of one [`deliver_command`](crate::service::RelayService::deliver_command)
/// call.
///
/// Deliberately an enum rather than a boolean so that callers can attach
/// fallback policy (buffering, queue hand-off) to the no-recipients case
/// without the core growing any of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The packet was pushed to every endpoint registered for the
    /// application at the time of the snapshot.
    Delivered {
        /// Size of the endpoint set the packet was fanned out to.
        recipients: usize,
    },

    /// No endpoint was registered for the application; the packet was
    /// dropped.
    NoRecipients,
}

impl DeliveryOutcome {
    /// Returns `true` if at least one endpoint was addressed.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}
