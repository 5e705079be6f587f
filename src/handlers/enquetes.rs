// src/handlers/enquetes.rs

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
    models::enquete::{
        CreateEnquetePayload, EnqueteFilter, EnqueteResponse, UpdateEnquetePayload, VotoPayload,
    },
};

// GET /api/enquetes
#[utoipa::path(
    get,
    path = "/api/enquetes",
    tag = "Enquetes",
    params(EnqueteFilter),
    responses((status = 200, body = Vec<EnqueteResponse>))
)]
pub async fn list_enquetes(
    State(app_state): State<AppState>,
    Query(filter): Query<EnqueteFilter>,
) -> Result<impl IntoResponse, AppError> {
    let enquetes: Vec<EnqueteResponse> = app_state
        .enquete_repo
        .list(&app_state.db_pool, &filter)
        .await?
        .into_iter()
        .map(EnqueteResponse::from)
        .collect();

    Ok(Json(enquetes))
}

// GET /api/enquetes/{id}
#[utoipa::path(
    get,
    path = "/api/enquetes/{id}",
    tag = "Enquetes",
    params(("id" = Uuid, Path, description = "ID da enquete")),
    responses((status = 200, body = EnqueteResponse), (status = 404, description = "Enquete não encontrada"))
)]
pub async fn get_enquete(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let enquete = app_state.enquete_repo.get(&app_state.db_pool, id).await?;
    Ok(Json(EnqueteResponse::from(enquete)))
}

// POST /api/enquetes
#[utoipa::path(
    post,
    path = "/api/enquetes",
    tag = "Enquetes",
    request_body = CreateEnquetePayload,
    responses(
        (status = 201, description = "Enquete criada com placar zerado", body = EnqueteResponse),
        (status = 400, description = "Dados inválidos ou menos de 2 opções")
    )
)]
pub async fn create_enquete(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateEnquetePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let enquete = app_state.enquete_service.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(enquete)))
}

// POST /api/enquetes/{id}/votar
#[utoipa::path(
    post,
    path = "/api/enquetes/{id}/votar",
    tag = "Enquetes",
    params(("id" = Uuid, Path, description = "ID da enquete")),
    request_body = VotoPayload,
    responses(
        (status = 200, description = "Voto registrado", body = EnqueteResponse),
        (status = 400, description = "Opção inválida"),
        (status = 422, description = "Enquete encerrada ou voto repetido"),
        (status = 404, description = "Enquete não encontrada")
    )
)]
pub async fn vote_enquete(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VotoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let enquete = app_state
        .enquete_service
        .vote(&app_state.db_pool, id, payload.opcao_index, &payload.votante)
        .await?;
    Ok(Json(enquete))
}

// PUT /api/enquetes/{id}
#[utoipa::path(
    put,
    path = "/api/enquetes/{id}",
    tag = "Enquetes",
    params(("id" = Uuid, Path, description = "ID da enquete")),
    request_body = UpdateEnquetePayload,
    responses(
        (status = 200, body = EnqueteResponse),
        (status = 404, description = "Enquete não encontrada"),
        (status = 422, description = "Enquete encerrada não pode ser reaberta")
    )
)]
pub async fn update_enquete(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEnquetePayload>,
) -> Result<impl IntoResponse, AppError> {
    let enquete = app_state.enquete_service.update(&app_state.db_pool, id, payload).await?;
    Ok(Json(enquete))
}

// DELETE /api/enquetes/{id}
#[utoipa::path(
    delete,
    path = "/api/enquetes/{id}",
    tag = "Enquetes",
    params(("id" = Uuid, Path, description = "ID da enquete")),
    responses((status = 204), (status = 404, description = "Enquete não encontrada"))
)]
pub async fn delete_enquete(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.enquete_repo.delete(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
