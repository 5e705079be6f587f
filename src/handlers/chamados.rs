// src/handlers/chamados.rs

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
    models::chamado::{
        Chamado, ChamadoFilter, CreateChamadoPayload, MensagemPreview, TemplateCatalog,
        UpdateChamadoPayload,
    },
    services::chamado_service,
};

// =============================================================================
//  ÁREA 1: CHAMADOS
// =============================================================================

// GET /api/chamados
#[utoipa::path(
    get,
    path = "/api/chamados",
    tag = "Chamados",
    params(ChamadoFilter),
    responses((status = 200, description = "Chamados, mais recentes primeiro", body = Vec<Chamado>))
)]
pub async fn list_chamados(
    State(app_state): State<AppState>,
    Query(filter): Query<ChamadoFilter>,
) -> Result<impl IntoResponse, AppError> {
    let chamados = app_state.chamado_repo.list(&app_state.db_pool, &filter).await?;
    Ok(Json(chamados))
}

// GET /api/chamados/{id}
#[utoipa::path(
    get,
    path = "/api/chamados/{id}",
    tag = "Chamados",
    params(("id" = Uuid, Path, description = "ID do chamado")),
    responses((status = 200, body = Chamado), (status = 404, description = "Chamado não encontrado"))
)]
pub async fn get_chamado(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let chamado = app_state.chamado_repo.get(&app_state.db_pool, id).await?;
    Ok(Json(chamado))
}

// POST /api/chamados
#[utoipa::path(
    post,
    path = "/api/chamados",
    tag = "Chamados",
    request_body = CreateChamadoPayload,
    responses(
        (status = 201, description = "Chamado aberto com número sequencial", body = Chamado),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_chamado(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateChamadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let chamado = app_state.chamado_service.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(chamado)))
}

// PUT /api/chamados/{id}
#[utoipa::path(
    put,
    path = "/api/chamados/{id}",
    tag = "Chamados",
    params(("id" = Uuid, Path, description = "ID do chamado")),
    request_body = UpdateChamadoPayload,
    responses((status = 200, body = Chamado), (status = 404, description = "Chamado não encontrado"))
)]
pub async fn update_chamado(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateChamadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let chamado = app_state.chamado_repo.update(&app_state.db_pool, id, payload).await?;
    Ok(Json(chamado))
}

// DELETE /api/chamados/{id}
#[utoipa::path(
    delete,
    path = "/api/chamados/{id}",
    tag = "Chamados",
    params(("id" = Uuid, Path, description = "ID do chamado")),
    responses((status = 204), (status = 404, description = "Chamado não encontrado"))
)]
pub async fn delete_chamado(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.chamado_repo.delete(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: MENSAGENS (WHATSAPP)
// =============================================================================

// GET /api/chamados/templates
#[utoipa::path(
    get,
    path = "/api/chamados/templates",
    tag = "Chamados",
    responses((status = 200, description = "Modelos de mensagem disponíveis", body = TemplateCatalog))
)]
pub async fn list_templates() -> impl IntoResponse {
    Json(chamado_service::template_catalog())
}

// GET /api/chamados/{id}/whatsapp
#[utoipa::path(
    get,
    path = "/api/chamados/{id}/whatsapp",
    tag = "Chamados",
    params(("id" = Uuid, Path, description = "ID do chamado")),
    responses(
        (status = 200, body = MensagemPreview),
        (status = 404, description = "Chamado não encontrado"),
        (status = 422, description = "Chamado sem prestador/telefone vinculado")
    )
)]
pub async fn get_whatsapp(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let preview = app_state.chamado_service.whatsapp(&app_state.db_pool, id).await?;
    Ok(Json(preview))
}
