//! command-relay server entry point.
//!
//! Starts the Axum HTTP server carrying both the WebSocket relay and
//! the durable queue endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use command_relay::api;
use command_relay::app_state::AppState;
use command_relay::config::RelayConfig;
use command_relay::domain::{ClientRegistry, CommandQueue};
use command_relay::service::RelayService;
use command_relay::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = RelayConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        applications = ?config.queue_applications,
        "starting command-relay"
    );

    // Build domain layer
    let registry = Arc::new(ClientRegistry::new());
    let queue = Arc::new(CommandQueue::new(config.queue_applications.clone()));

    // Build service layer
    let relay = Arc::new(RelayService::new(registry));

    // Build application state
    let app_state = AppState { relay, queue };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
