//! Durable queue handlers: add and drain.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{AddCommandResponse, DrainCommandsResponse};
use crate::app_state::AppState;
use crate::domain::CommandPacket;
use crate::error::RelayError;

/// `POST /commands/add/` — Append a command packet to its application's
/// queue.
///
/// # Errors
///
/// Returns [`RelayError::UnknownApplication`] (as a `FAIL` body at
/// HTTP 200) when the packet's application is not allow-listed.
#[utoipa::path(
    post,
    path = "/commands/add/",
    tag = "Commands",
    summary = "Queue a command packet",
    description = "Appends the posted packet to the queue of the application it names. The packet body beyond `application` is opaque and stored verbatim. Unknown applications yield a FAIL body without side effects.",
    request_body = CommandPacket,
    responses(
        (status = 200, description = "Packet queued, or FAIL for an unknown application", body = AddCommandResponse),
    )
)]
pub async fn add_command(
    State(state): State<AppState>,
    Json(packet): Json<CommandPacket>,
) -> Result<impl IntoResponse, RelayError> {
    let application = packet.application.clone();
    state.queue.add(packet).await?;
    tracing::info!(application, "command queued");
    Ok(Json(AddCommandResponse::success()))
}

/// `GET /commands/get/{application}` — Drain everything pending for an
/// application.
///
/// Draining is destructive: the returned batch is removed atomically and
/// a consumer that crashes before executing it loses it.
///
/// # Errors
///
/// Returns [`RelayError::UnknownApplication`] (as a `FAIL` body at
/// HTTP 200) when the application is not allow-listed.
#[utoipa::path(
    get,
    path = "/commands/get/{application}",
    tag = "Commands",
    summary = "Drain pending commands",
    description = "Atomically removes and returns all pending packets for the application, in insertion order. An empty queue yields SUCCESS with an empty list; an unknown application yields a FAIL body without side effects.",
    params(
        ("application" = String, Path, description = "Allow-listed application name"),
    ),
    responses(
        (status = 200, description = "Drained batch, or FAIL for an unknown application", body = DrainCommandsResponse),
    )
)]
pub async fn get_commands(
    State(state): State<AppState>,
    Path(application): Path<String>,
) -> Result<impl IntoResponse, RelayError> {
    let commands = state.queue.drain(&application).await?;
    tracing::info!(application, count = commands.len(), "commands drained");
    Ok(Json(DrainCommandsResponse::success(application, commands)))
}

/// Queue routes. The deployed pollers append trailing slashes, so both
/// forms of each path are routed.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/commands/add", post(add_command))
        .route("/commands/add/", post(add_command))
        .route("/commands/get/{application}", get(get_commands))
        .route("/commands/get/{application}/", get(get_commands))
}
