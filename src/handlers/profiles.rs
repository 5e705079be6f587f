// src/handlers/profiles.rs

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
    models::profile::{CreateProfilePayload, Profile, ProfileFilter, UpdateProfilePayload},
};

// GET /api/profiles
#[utoipa::path(
    get,
    path = "/api/profiles",
    tag = "Perfis",
    params(ProfileFilter),
    responses((status = 200, description = "Perfis ordenados por nome", body = Vec<Profile>))
)]
pub async fn list_profiles(
    State(app_state): State<AppState>,
    Query(filter): Query<ProfileFilter>,
) -> Result<impl IntoResponse, AppError> {
    let profiles = app_state.profile_repo.list(&app_state.db_pool, &filter).await?;
    Ok(Json(profiles))
}

// GET /api/profiles/{slug}
#[utoipa::path(
    get,
    path = "/api/profiles/{slug}",
    tag = "Perfis",
    params(("slug" = String, Path, description = "Slug do perfil")),
    responses(
        (status = 200, body = Profile),
        (status = 404, description = "Perfil não encontrado")
    )
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state.profile_repo.get(&app_state.db_pool, &slug).await?;
    Ok(Json(profile))
}

// POST /api/profiles
#[utoipa::path(
    post,
    path = "/api/profiles",
    tag = "Perfis",
    request_body = CreateProfilePayload,
    responses(
        (status = 201, description = "Perfil criado", body = Profile),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Slug ou e-mail já em uso")
    )
)]
pub async fn create_profile(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = app_state.profile_repo.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

// PUT /api/profiles/{slug}
#[utoipa::path(
    put,
    path = "/api/profiles/{slug}",
    tag = "Perfis",
    params(("slug" = String, Path, description = "Slug do perfil")),
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = Profile),
        (status = 404, description = "Perfil não encontrado")
    )
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state.profile_repo.update(&app_state.db_pool, &slug, payload).await?;
    Ok(Json(profile))
}

// DELETE /api/profiles/{slug}
#[utoipa::path(
    delete,
    path = "/api/profiles/{slug}",
    tag = "Perfis",
    params(("slug" = String, Path, description = "Slug do perfil")),
    responses(
        (status = 204, description = "Perfil removido"),
        (status = 404, description = "Perfil não encontrado")
    )
)]
pub async fn delete_profile(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.profile_repo.delete(&app_state.db_pool, &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
