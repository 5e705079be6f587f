// src/handlers/sheets.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::sheet::{SheetData, SyncResult},
};

// GET /api/sheets
#[utoipa::path(
    get,
    path = "/api/sheets",
    tag = "Planilha",
    responses(
        (status = 200, description = "Linhas da planilha de compras e totais", body = SheetData),
        (status = 502, description = "Planilha indisponível")
    )
)]
pub async fn get_sheet(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let data = app_state.sheet_service.snapshot().await?;
    Ok(Json(data))
}

// POST /api/sheets/sync
#[utoipa::path(
    post,
    path = "/api/sheets/sync",
    tag = "Planilha",
    responses(
        (status = 200, description = "Itens do inventário atualizados a partir da planilha", body = SyncResult),
        (status = 502, description = "Planilha indisponível")
    )
)]
pub async fn sync_sheet(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let result = app_state.sheet_service.sync(&app_state.db_pool).await?;
    Ok(Json(result))
}
