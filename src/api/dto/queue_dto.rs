//! DTOs for the durable queue endpoints.
//!
//! The `status` literals are upper-case (`SUCCESS`/`FAIL`) because the
//! deployed pollers match on them exactly.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::CommandPacket;

/// Response to a successful `POST /commands/add/`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddCommandResponse {
    /// Always the literal `"SUCCESS"`.
    pub status: String,
}

impl AddCommandResponse {
    /// Builds the success body.
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: "SUCCESS".to_string(),
        }
    }
}

/// Response to a successful `GET /commands/get/{application}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrainCommandsResponse {
    /// Always the literal `"SUCCESS"`.
    pub status: String,
    /// The application whose queue was drained.
    pub application: String,
    /// Everything that was pending, in insertion order. Empty when
    /// nothing was queued.
    pub commands: Vec<CommandPacket>,
}

impl DrainCommandsResponse {
    /// Builds the success body for a drained batch.
    #[must_use]
    pub fn success(application: impl Into<String>, commands: Vec<CommandPacket>) -> Self {
        Self {
            status: "SUCCESS".to_string(),
            application: application.into(),
            commands,
        }
    }
}

/// Response to `GET /config/applications`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationsResponse {
    /// The configured queue allow-list, sorted.
    pub applications: Vec<String>,
}
