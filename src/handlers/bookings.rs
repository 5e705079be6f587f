// src/handlers/bookings.rs

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
    models::booking::{Booking, BookingFilter, CreateBookingPayload, UpdateBookingPayload},
};

// GET /api/bookings
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Reservas",
    params(BookingFilter),
    responses((status = 200, description = "Reservas ordenadas pelo início", body = Vec<Booking>))
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
    Query(filter): Query<BookingFilter>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state.booking_repo.list(&app_state.db_pool, &filter).await?;
    Ok(Json(bookings))
}

// GET /api/bookings/{id}
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses((status = 200, body = Booking), (status = 404, description = "Reserva não encontrada"))
)]
pub async fn get_booking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.booking_repo.get(&app_state.db_pool, id).await?;
    Ok(Json(booking))
}

// POST /api/bookings
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Reservas",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Reserva criada", body = Booking),
        (status = 400, description = "Dados inválidos ou intervalo vazio"),
        (status = 409, description = "Conflito com outra reserva ativa do mesmo espaço")
    )
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let booking = app_state.booking_service.create(&app_state.db_pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// PUT /api/bookings/{id}
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    request_body = UpdateBookingPayload,
    responses((status = 200, body = Booking), (status = 404, description = "Reserva não encontrada"))
)]
pub async fn update_booking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.booking_repo.update(&app_state.db_pool, id, payload).await?;
    Ok(Json(booking))
}

// DELETE /api/bookings/{id}
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "Reservas",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses((status = 204), (status = 404, description = "Reserva não encontrada"))
)]
pub async fn delete_booking(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.booking_repo.delete(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
