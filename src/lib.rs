//! # command-relay
//!
//! WebSocket relay and durable poll queue for routing opaque command
//! packets to creative desktop applications.
//!
//! The relay addresses packets purely by their `application` name and
//! never inspects their contents. Plugins that can hold a connection
//! register over WebSocket and receive commands as they arrive; plugins
//! that cannot poll the HTTP queue instead. Command execution happens
//! entirely in the plugins — this service is a routing layer.
//!
//! ## Architecture
//!
//! ```text
//! Senders (WebSocket)          Producers / Pollers (HTTP)
//!     │                            │
//!     ├── WS Handler (ws/)         ├── REST Handlers (api/)
//!     │                            │
//!     ├── RelayService (service/)  ├── CommandQueue (domain/)
//!     │                            │
//!     └── ClientRegistry (domain/)─┘
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
