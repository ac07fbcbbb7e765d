//! Relay error types and their in-band wire mapping.
//!
//! [`RelayError`] is the central error type for the relay core. Business
//! failures never terminate the process: queue failures surface as
//! `status:"FAIL"` JSON bodies, relay-side failures are logged and the
//! offending frame is dropped.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ClientId;

/// Structured JSON body for a failed queue operation.
///
/// All failure responses follow this shape:
/// ```json
/// {
///   "status": "FAIL",
///   "message": "Application not supported: aftereffects"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct FailResponse {
    /// Always the literal `"FAIL"`.
    pub status: String,
    /// Human-readable failure reason.
    pub message: String,
}

impl FailResponse {
    /// Builds a `FAIL` body with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "FAIL".to_string(),
            message: message.into(),
        }
    }
}

/// Business-logic failures of the relay core.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Application name absent from the queue allow-list.
    #[error("Application not supported: {0}")]
    UnknownApplication(String),

    /// A response packet carried no usable `senderId`.
    #[error("response packet has no senderId")]
    MissingSenderId,

    /// The addressed client is not (or no longer) connected.
    #[error("client not connected: {0}")]
    ClientNotConnected(ClientId),
}

impl RelayError {
    /// Returns the HTTP status code for this variant.
    ///
    /// Every variant maps to `200 OK`: the deployed pollers treat any
    /// non-2xx reply as a transport error and only inspect the `status`
    /// tag afterwards, so business failures must ride HTTP 200 with the
    /// `FAIL` tag in-band.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownApplication(_) | Self::MissingSenderId | Self::ClientNotConnected(_) => {
                StatusCode::OK
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = FailResponse::new(self.to_string());
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
