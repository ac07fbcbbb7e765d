//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::CommandQueue;
use crate::service::RelayService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Relay service for the live push path.
    pub relay: Arc<RelayService>,
    /// Durable poll queue for the pull path.
    pub queue: Arc<CommandQueue>,
}
