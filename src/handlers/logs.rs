// src/handlers/logs.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::log::{CreateLogPayload, Log, LogFilter},
};

// Registro de uso é só-anexação: sem PUT nem DELETE.

// GET /api/logs
#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "Logs",
    params(LogFilter),
    responses((status = 200, description = "Registros, mais recentes primeiro", body = Vec<Log>))
)]
pub async fn list_logs(
    State(app_state): State<AppState>,
    Query(filter): Query<LogFilter>,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.log_repo.list(&app_state.db_pool, &filter).await?;
    Ok(Json(logs))
}

// GET /api/logs/{id}
#[utoipa::path(
    get,
    path = "/api/logs/{id}",
    tag = "Logs",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses((status = 200, body = Log), (status = 404, description = "Registro não encontrado"))
)]
pub async fn get_log(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let log = app_state.log_repo.get(&app_state.db_pool, id).await?;
    Ok(Json(log))
}

// POST /api/logs
#[utoipa::path(
    post,
    path = "/api/logs",
    tag = "Logs",
    request_body = CreateLogPayload,
    responses((status = 201, body = Log), (status = 400, description = "Dados inválidos"))
)]
pub async fn create_log(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateLogPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let log = app_state.log_repo.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(log)))
}
