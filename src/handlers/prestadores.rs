// src/handlers/prestadores.rs

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
    models::prestador::{
        CreatePrestadorPayload, Prestador, PrestadorFilter, UpdatePrestadorPayload,
    },
};

// GET /api/prestadores
#[utoipa::path(
    get,
    path = "/api/prestadores",
    tag = "Prestadores",
    params(PrestadorFilter),
    responses((status = 200, body = Vec<Prestador>))
)]
pub async fn list_prestadores(
    State(app_state): State<AppState>,
    Query(filter): Query<PrestadorFilter>,
) -> Result<impl IntoResponse, AppError> {
    let prestadores = app_state.prestador_repo.list(&app_state.db_pool, &filter).await?;
    Ok(Json(prestadores))
}

// GET /api/prestadores/{id}
#[utoipa::path(
    get,
    path = "/api/prestadores/{id}",
    tag = "Prestadores",
    params(("id" = Uuid, Path, description = "ID do prestador")),
    responses((status = 200, body = Prestador), (status = 404, description = "Prestador não encontrado"))
)]
pub async fn get_prestador(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let prestador = app_state.prestador_repo.get(&app_state.db_pool, id).await?;
    Ok(Json(prestador))
}

// POST /api/prestadores
#[utoipa::path(
    post,
    path = "/api/prestadores",
    tag = "Prestadores",
    request_body = CreatePrestadorPayload,
    responses((status = 201, body = Prestador), (status = 400, description = "Dados inválidos"))
)]
pub async fn create_prestador(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePrestadorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let prestador = app_state.prestador_repo.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(prestador)))
}

// PUT /api/prestadores/{id}
#[utoipa::path(
    put,
    path = "/api/prestadores/{id}",
    tag = "Prestadores",
    params(("id" = Uuid, Path, description = "ID do prestador")),
    request_body = UpdatePrestadorPayload,
    responses((status = 200, body = Prestador), (status = 404, description = "Prestador não encontrado"))
)]
pub async fn update_prestador(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePrestadorPayload>,
) -> Result<impl IntoResponse, AppError> {
    let prestador = app_state.prestador_repo.update(&app_state.db_pool, id, payload).await?;
    Ok(Json(prestador))
}

// DELETE /api/prestadores/{id}
#[utoipa::path(
    delete,
    path = "/api/prestadores/{id}",
    tag = "Prestadores",
    params(("id" = Uuid, Path, description = "ID do prestador")),
    responses((status = 204), (status = 404, description = "Prestador não encontrado"))
)]
pub async fn delete_prestador(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.prestador_repo.delete(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
