// src/db/booking_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::booking::{Booking, BookingFilter, CreateBookingPayload, UpdateBookingPayload},
};

const COLUMNS: &str = "id, space_slug, item_codigos, profile_slug, data_inicio, data_fim, tipo_uso, \
                       finalidade, numero_pessoas, status, checkin_itens, checkout_itens, \
                       checklist_entrada, checklist_saida, observacoes, created_at";

#[derive(Clone, Default)]
pub struct BookingRepository;

impl BookingRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &BookingFilter) -> Result<Vec<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM bookings
            WHERE ($1::booking_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR profile_slug = $2)
              AND ($3::text IS NULL OR space_slug = $3)
            ORDER BY data_inicio DESC
            "#
        );
        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .bind(filter.status)
            .bind(filter.profile_slug.as_deref())
            .bind(filter.space_slug.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(bookings)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found("Reserva", id))
    }

    /// Reservas ativas do espaço que cruzam o intervalo semiaberto [inicio, fim).
    /// A lista de status ativos espelha `BookingStatus::ACTIVE`.
    pub async fn list_active_overlapping<'e, E>(
        &self,
        executor: E,
        space_slug: &str,
        inicio: DateTime<Utc>,
        fim: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM bookings
            WHERE space_slug = $1
              AND status IN ('pendente', 'confirmada', 'em_andamento')
              AND data_inicio < $3
              AND $2 < data_fim
            ORDER BY data_inicio ASC
            "#
        );
        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .bind(space_slug)
            .bind(inicio)
            .bind(fim)
            .fetch_all(executor)
            .await?;

        Ok(bookings)
    }

    pub async fn insert<'e, E>(&self, executor: E, p: &CreateBookingPayload) -> Result<Booking, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO bookings (
                space_slug, item_codigos, profile_slug, data_inicio, data_fim, tipo_uso,
                finalidade, numero_pessoas, status, observacoes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUMNS}
            "#
        );
        let booking = sqlx::query_as::<_, Booking>(&sql)
            .bind(&p.space_slug)
            .bind(&p.item_codigos)
            .bind(&p.profile_slug)
            .bind(p.data_inicio)
            .bind(p.data_fim)
            .bind(&p.tipo_uso)
            .bind(&p.finalidade)
            .bind(p.numero_pessoas)
            .bind(p.status)
            .bind(&p.observacoes)
            .fetch_one(executor)
            .await?;

        Ok(booking)
    }

    pub async fn update<'a, A>(
        &self,
        conn: A,
        id: Uuid,
        patch: UpdateBookingPayload,
    ) -> Result<Booking, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let sql = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE");
        let mut booking = sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Reserva", id))?;

        booking.apply(patch);
        if !booking.has_valid_interval() {
            return Err(AppError::InvalidInput(
                "A data de início deve ser anterior à data de fim.".to_string(),
            ));
        }

        let sql = format!(
            r#"
            UPDATE bookings
            SET space_slug = $2, item_codigos = $3, data_inicio = $4, data_fim = $5,
                tipo_uso = $6, finalidade = $7, numero_pessoas = $8, status = $9,
                checkin_itens = $10, checkout_itens = $11, checklist_entrada = $12,
                checklist_saida = $13, observacoes = $14
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Booking>(&sql)
            .bind(booking.id)
            .bind(&booking.space_slug)
            .bind(&booking.item_codigos)
            .bind(booking.data_inicio)
            .bind(booking.data_fim)
            .bind(&booking.tipo_uso)
            .bind(&booking.finalidade)
            .bind(booking.numero_pessoas)
            .bind(booking.status)
            .bind(booking.checkin_itens)
            .bind(booking.checkout_itens)
            .bind(&booking.checklist_entrada)
            .bind(&booking.checklist_saida)
            .bind(&booking.observacoes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Reserva", id));
        }
        Ok(())
    }
}
