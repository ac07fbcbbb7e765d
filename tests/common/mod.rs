//! Shared bootstrap for end-to-end tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use command_relay::api;
use command_relay::app_state::AppState;
use command_relay::domain::{ClientRegistry, CommandQueue};
use command_relay::service::RelayService;
use command_relay::ws::handler::ws_handler;

/// Boots the real server on an ephemeral port with the default
/// two-application allow-list, returning its bound address.
///
/// # Panics
///
/// Panics if the listener cannot bind.
#[allow(clippy::panic)]
pub async fn spawn_server() -> SocketAddr {
    let registry = Arc::new(ClientRegistry::new());
    let relay = Arc::new(RelayService::new(registry));
    let queue = Arc::new(CommandQueue::new([
        "photoshop".to_string(),
        "premiere".to_string(),
    ]));
    let state = AppState { relay, queue };

    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no local addr");
    };

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}
