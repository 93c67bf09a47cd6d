use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use utoipa::OpenApi;

use crate::{
    models::dto::{HealthStatus, ServiceStatus},
    AppState, Backend,
};

#[derive(OpenApi)]
#[openapi(paths(root_status_handler, health_checker_handler))]
/// Defines the OpenAPI spec for health endpoints
pub struct HealthApi;

#[utoipa::path(
    get,
    path = "/",
    tag = "HEALTH",
    responses(
        (status = 200, description = "Service status", body = ServiceStatus)
    )
)]
pub async fn root_status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match &state.backend {
        Backend::Database(_) => "PostgreSQL (Supabase)",
        Backend::Flow(_) => "SharePoint (Power Automate)",
    };
    Json(ServiceStatus {
        message: "✓ API de sincronización funcionando".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        status: "online".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "HEALTH",
    responses(
        (status = 200, description = "Liveness probe", body = HealthStatus)
    )
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
