//! Data Transfer Objects for REST request/response serialization.
//!
//! Command bodies are never re-shaped here: what a producer posts is
//! what a poller drains.

pub mod queue_dto;

pub use queue_dto::*;
