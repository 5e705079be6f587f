// src/handlers/health.rs

use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: &'static str,
}

// GET /healthz
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Saúde",
    responses((status = 200, body = HealthStatus))
)]
pub async fn healthz() -> impl IntoResponse {
    Json(HealthStatus { status: "ok" })
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Saúde",
    responses((status = 200, description = "Servidor no ar", body = String))
)]
pub async fn api_health() -> &'static str {
    "OK"
}
