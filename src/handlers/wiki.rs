// src/handlers/wiki.rs

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
    models::wiki::{CreateWikiPayload, UpdateWikiPayload, WikiArticle, WikiFilter},
};

// GET /api/wiki
#[utoipa::path(
    get,
    path = "/api/wiki",
    tag = "Wiki",
    params(WikiFilter),
    responses((status = 200, body = Vec<WikiArticle>))
)]
pub async fn list_articles(
    State(app_state): State<AppState>,
    Query(filter): Query<WikiFilter>,
) -> Result<impl IntoResponse, AppError> {
    let articles = app_state.wiki_repo.list(&app_state.db_pool, &filter).await?;
    Ok(Json(articles))
}

// GET /api/wiki/{slug}
#[utoipa::path(
    get,
    path = "/api/wiki/{slug}",
    tag = "Wiki",
    params(("slug" = String, Path, description = "Slug do artigo")),
    responses((status = 200, body = WikiArticle), (status = 404, description = "Artigo não encontrado"))
)]
pub async fn get_article(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let article = app_state.wiki_repo.get(&app_state.db_pool, &slug).await?;
    Ok(Json(article))
}

// POST /api/wiki
#[utoipa::path(
    post,
    path = "/api/wiki",
    tag = "Wiki",
    request_body = CreateWikiPayload,
    responses(
        (status = 201, body = WikiArticle),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Slug já em uso")
    )
)]
pub async fn create_article(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateWikiPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let article = app_state.wiki_repo.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

// PUT /api/wiki/{slug}
#[utoipa::path(
    put,
    path = "/api/wiki/{slug}",
    tag = "Wiki",
    params(("slug" = String, Path, description = "Slug do artigo")),
    request_body = UpdateWikiPayload,
    responses((status = 200, body = WikiArticle), (status = 404, description = "Artigo não encontrado"))
)]
pub async fn update_article(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateWikiPayload>,
) -> Result<impl IntoResponse, AppError> {
    let article = app_state.wiki_repo.update(&app_state.db_pool, &slug, payload).await?;
    Ok(Json(article))
}

// DELETE /api/wiki/{slug}
#[utoipa::path(
    delete,
    path = "/api/wiki/{slug}",
    tag = "Wiki",
    params(("slug" = String, Path, description = "Slug do artigo")),
    responses((status = 204), (status = 404, description = "Artigo não encontrado"))
)]
pub async fn delete_article(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.wiki_repo.delete(&app_state.db_pool, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
