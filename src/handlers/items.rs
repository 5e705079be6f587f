// src/handlers/items.rs

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
    models::item::{CreateItemPayload, Item, ItemFilter, UpdateItemPayload},
};

// GET /api/items
#[utoipa::path(
    get,
    path = "/api/items",
    tag = "Itens",
    params(ItemFilter),
    responses((status = 200, body = Vec<Item>))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    Query(filter): Query<ItemFilter>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.item_repo.list(&app_state.db_pool, &filter).await?;
    Ok(Json(items))
}

// GET /api/items/{codigo}
#[utoipa::path(
    get,
    path = "/api/items/{codigo}",
    tag = "Itens",
    params(("codigo" = String, Path, description = "Código do item, ex: cozinha.panela")),
    responses((status = 200, body = Item), (status = 404, description = "Item não encontrado"))
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.item_repo.get(&app_state.db_pool, &codigo).await?;
    Ok(Json(item))
}

// POST /api/items
#[utoipa::path(
    post,
    path = "/api/items",
    tag = "Itens",
    request_body = CreateItemPayload,
    responses(
        (status = 201, body = Item),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Código já em uso")
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state.item_repo.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/items/{codigo}
#[utoipa::path(
    put,
    path = "/api/items/{codigo}",
    tag = "Itens",
    params(("codigo" = String, Path, description = "Código do item")),
    request_body = UpdateItemPayload,
    responses((status = 200, body = Item), (status = 404, description = "Item não encontrado"))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    Path(codigo): Path<String>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.item_repo.update(&app_state.db_pool, &codigo, payload).await?;
    Ok(Json(item))
}

// DELETE /api/items/{codigo}
#[utoipa::path(
    delete,
    path = "/api/items/{codigo}",
    tag = "Itens",
    params(("codigo" = String, Path, description = "Código do item")),
    responses((status = 204), (status = 404, description = "Item não encontrado"))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.item_repo.delete(&app_state.db_pool, &codigo).await?;
    Ok(StatusCode::NO_CONTENT)
}
