//! System endpoints: health check and application catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApplicationsResponse;
use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process is serving.
    status: String,
    /// Current server time, RFC 3339.
    timestamp: String,
    /// Crate version.
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/applications` — List the queue allow-list.
#[utoipa::path(
    get,
    path = "/config/applications",
    tag = "System",
    summary = "List allow-listed applications",
    description = "Returns the application names the durable queue accepts, for controller discovery.",
    responses(
        (status = 200, description = "Application catalog", body = ApplicationsResponse),
    )
)]
pub async fn applications_handler(State(state): State<AppState>) -> impl IntoResponse {
    let applications = state.queue.applications().await;
    (StatusCode::OK, Json(ApplicationsResponse { applications }))
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/applications", get(applications_handler))
}
