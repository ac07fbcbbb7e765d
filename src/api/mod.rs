//! REST API layer: route handlers, DTOs, and router composition.
//!
//! The queue endpoints are mounted at the root so the deployed pollers'
//! paths (`/commands/add/`, `/commands/get/{application}`) keep working.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering every HTTP endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "command-relay",
        description = "Relay and durable poll queue for routing opaque command packets to creative applications."
    ),
    paths(
        handlers::commands::add_command,
        handlers::commands::get_commands,
        handlers::system::health_handler,
        handlers::system::applications_handler,
    ),
    components(schemas(
        crate::domain::CommandPacket,
        dto::AddCommandResponse,
        dto::DrainCommandsResponse,
        dto::ApplicationsResponse,
        handlers::system::HealthResponse,
        crate::error::FailResponse,
    )),
    tags(
        (name = "Commands", description = "Durable poll queue"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
