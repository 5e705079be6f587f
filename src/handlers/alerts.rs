// src/handlers/alerts.rs

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
    models::alert::{Alert, AlertFilter, CreateAlertPayload, UpdateAlertPayload},
};

// GET /api/alerts
#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "Alertas",
    params(AlertFilter),
    responses((status = 200, body = Vec<Alert>))
)]
pub async fn list_alerts(
    State(app_state): State<AppState>,
    Query(filter): Query<AlertFilter>,
) -> Result<impl IntoResponse, AppError> {
    let alerts = app_state.alert_repo.list(&app_state.db_pool, &filter).await?;
    Ok(Json(alerts))
}

// GET /api/alerts/{id}
#[utoipa::path(
    get,
    path = "/api/alerts/{id}",
    tag = "Alertas",
    params(("id" = Uuid, Path, description = "ID do alerta")),
    responses((status = 200, body = Alert), (status = 404, description = "Alerta não encontrado"))
)]
pub async fn get_alert(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let alert = app_state.alert_repo.get(&app_state.db_pool, id).await?;
    Ok(Json(alert))
}

// POST /api/alerts
#[utoipa::path(
    post,
    path = "/api/alerts",
    tag = "Alertas",
    request_body = CreateAlertPayload,
    responses((status = 201, body = Alert), (status = 400, description = "Dados inválidos"))
)]
pub async fn create_alert(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAlertPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let alert = app_state.alert_repo.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

// PUT /api/alerts/{id}
#[utoipa::path(
    put,
    path = "/api/alerts/{id}",
    tag = "Alertas",
    params(("id" = Uuid, Path, description = "ID do alerta")),
    request_body = UpdateAlertPayload,
    responses((status = 200, body = Alert), (status = 404, description = "Alerta não encontrado"))
)]
pub async fn update_alert(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAlertPayload>,
) -> Result<impl IntoResponse, AppError> {
    let alert = app_state.alert_repo.update(&app_state.db_pool, id, payload).await?;
    Ok(Json(alert))
}

// DELETE /api/alerts/{id}
#[utoipa::path(
    delete,
    path = "/api/alerts/{id}",
    tag = "Alertas",
    params(("id" = Uuid, Path, description = "ID do alerta")),
    responses((status = 204), (status = 404, description = "Alerta não encontrado"))
)]
pub async fn delete_alert(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.alert_repo.delete(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
