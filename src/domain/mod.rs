//! Domain layer: core types, live registry, and the poll queue.
//!
//! This module contains the relay's domain model: connection identity,
//! the command packet shapes crossing the wire, the registry mapping
//! applications to their live endpoints, the per-application poll
//! queues, and the delivery vocabulary of the fan-out path.

pub mod client_id;
pub mod delivery;
pub mod packet;
pub mod queue;
pub mod registry;

pub use client_id::ClientId;
pub use delivery::{Delivery, DeliveryOutcome};
pub use packet::{CommandPacket, RoutedPacket};
pub use queue::CommandQueue;
pub use registry::ClientRegistry;
