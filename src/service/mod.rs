//! Service layer: live push orchestration.
//!
//! [`RelayService`] owns the connection directory, consults the
//! [`super::domain::ClientRegistry`] for addressing, and performs the
//! fire-and-forget fan-out and response forwarding.

pub mod relay_service;

pub use relay_service::RelayService;
