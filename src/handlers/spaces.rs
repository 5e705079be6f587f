// src/handlers/spaces.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::space::{CreateSpacePayload, Space, SpaceFilter, UpdateSpacePayload},
};

// GET /api/spaces
#[utoipa::path(
    get,
    path = "/api/spaces",
    tag = "Espaços",
    params(SpaceFilter),
    responses((status = 200, body = Vec<Space>))
)]
pub async fn list_spaces(
    State(app_state): State<AppState>,
    Query(filter): Query<SpaceFilter>,
) -> Result<impl IntoResponse, AppError> {
    let spaces = app_state.space_repo.list(&app_state.db_pool, &filter).await?;
    Ok(Json(spaces))
}

// GET /api/spaces/{slug}
#[utoipa::path(
    get,
    path = "/api/spaces/{slug}",
    tag = "Espaços",
    params(("slug" = String, Path, description = "Slug do espaço")),
    responses((status = 200, body = Space), (status = 404, description = "Espaço não encontrado"))
)]
pub async fn get_space(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let space = app_state.space_repo.get(&app_state.db_pool, &slug).await?;
    Ok(Json(space))
}

// POST /api/spaces
#[utoipa::path(
    post,
    path = "/api/spaces",
    tag = "Espaços",
    request_body = CreateSpacePayload,
    responses(
        (status = 201, body = Space),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Slug já em uso")
    )
)]
pub async fn create_space(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSpacePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let space = app_state.space_repo.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(space)))
}

// PUT /api/spaces/{slug}
#[utoipa::path(
    put,
    path = "/api/spaces/{slug}",
    tag = "Espaços",
    params(("slug" = String, Path, description = "Slug do espaço")),
    request_body = UpdateSpacePayload,
    responses((status = 200, body = Space), (status = 404, description = "Espaço não encontrado"))
)]
pub async fn update_space(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateSpacePayload>,
) -> Result<impl IntoResponse, AppError> {
    let space = app_state.space_repo.update(&app_state.db_pool, &slug, payload).await?;
    Ok(Json(space))
}

// DELETE /api/spaces/{slug}
#[utoipa::path(
    delete,
    path = "/api/spaces/{slug}",
    tag = "Espaços",
    params(("slug" = String, Path, description = "Slug do espaço")),
    responses((status = 204), (status = 404, description = "Espaço não encontrado"))
)]
pub async fn delete_space(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.space_repo.delete(&app_state.db_pool, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
