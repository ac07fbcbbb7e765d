//! Type-safe connection identifier.
//!
//! [`ClientId`] is a newtype wrapper around [`uuid::Uuid`] (v4) naming one
//! live WebSocket connection. It is minted when the connection is accepted,
//! dies with the connection, and is never reused.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ephemeral identity of one connected client.
///
/// Wraps a UUID v4 generated at connection-accept time. Used as the member
/// type in [`super::ClientRegistry`] sets, as the key of the relay's
/// outbound connection directory, and as the `senderId` stamped onto routed
/// packets so that receivers can address their responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(uuid::Uuid);

impl ClientId {
    /// Mints a new random `ClientId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `ClientId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for ClientId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ClientId> for uuid::Uuid {
    fn from(id: ClientId) -> Self {
        id.0
    }
}
