//! WebSocket layer: connection handling and message framing.
//!
//! The WebSocket endpoint at `/ws` carries the live push path:
//! registration, command fan-out, and response pass-through.

pub mod connection;
pub mod handler;
pub mod messages;
