// src/services/booking_service.rs

use chrono::{DateTime, Utc};
use sqlx::{Acquire, Postgres};
use tracing::warn;

use crate::{
    common::error::AppError,
    db::BookingRepository,
    models::booking::{Booking, CreateBookingPayload},
};

/// Intervalos semiabertos: [a_inicio, a_fim) e [b_inicio, b_fim) se cruzam?
/// Encostar as pontas (fim de um == início do outro) não é conflito.
pub fn overlaps(
    a_inicio: DateTime<Utc>,
    a_fim: DateTime<Utc>,
    b_inicio: DateTime<Utc>,
    b_fim: DateTime<Utc>,
) -> bool {
    a_inicio < b_fim && b_inicio < a_fim
}

/// Primeira reserva ativa do mesmo espaço que cruza o período pedido.
pub fn find_conflict<'a>(
    existing: &'a [Booking],
    space_slug: &str,
    inicio: DateTime<Utc>,
    fim: DateTime<Utc>,
) -> Option<&'a Booking> {
    existing.iter().find(|b| {
        b.space_slug.as_deref() == Some(space_slug)
            && b.status.is_active()
            && overlaps(inicio, fim, b.data_inicio, b.data_fim)
    })
}

#[derive(Clone)]
pub struct BookingService {
    repo: BookingRepository,
}

impl BookingService {
    pub fn new(repo: BookingRepository) -> Self {
        Self { repo }
    }

    /// Cria a reserva garantindo que não haja choque de agenda no espaço.
    ///
    /// Checagem e inserção acontecem na mesma transação, depois de um advisory
    /// lock por espaço: duas criações concorrentes para o mesmo espaço rodam
    /// uma depois da outra.
    pub async fn create<'a, A>(&self, conn: A, payload: &CreateBookingPayload) -> Result<Booking, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        if payload.data_inicio >= payload.data_fim {
            return Err(AppError::InvalidInput(
                "A data de início deve ser anterior à data de fim.".to_string(),
            ));
        }

        let mut tx = conn.begin().await?;

        if let Some(space_slug) = payload.space_slug.as_deref() {
            sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
                .bind(space_slug)
                .execute(&mut *tx)
                .await?;

            let candidates = self
                .repo
                .list_active_overlapping(&mut *tx, space_slug, payload.data_inicio, payload.data_fim)
                .await?;

            if let Some(existing) =
                find_conflict(&candidates, space_slug, payload.data_inicio, payload.data_fim)
            {
                warn!(
                    "Conflito de agenda no espaço '{}': reserva {} ocupa {} - {}",
                    space_slug, existing.id, existing.data_inicio, existing.data_fim
                );
                return Err(AppError::Conflict(format!(
                    "O espaço '{}' já está reservado entre {} e {}.",
                    space_slug,
                    existing.data_inicio.format("%d/%m/%Y %H:%M"),
                    existing.data_fim.format("%d/%m/%Y %H:%M"),
                )));
            }
        }

        let booking = self.repo.insert(&mut *tx, payload).await?;
        tx.commit().await?;

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::{BookingFilter, BookingStatus, UpdateBookingPayload};
    use sqlx::PgPool;
    use uuid::Uuid;

    fn at(hhmm: &str) -> DateTime<Utc> {
        format!("2024-03-05T{hhmm}:00Z").parse().unwrap()
    }

    fn booking(space: &str, inicio: &str, fim: &str, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            space_slug: Some(space.into()),
            item_codigos: None,
            profile_slug: "ana".into(),
            data_inicio: at(inicio),
            data_fim: at(fim),
            tipo_uso: None,
            finalidade: None,
            numero_pessoas: None,
            status,
            checkin_itens: None,
            checkout_itens: None,
            checklist_entrada: None,
            checklist_saida: None,
            observacoes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn partial_overlap_is_a_conflict() {
        let existing = [booking("salao", "10:30", "11:30", BookingStatus::Confirmada)];
        assert!(find_conflict(&existing, "salao", at("10:00"), at("11:00")).is_some());
    }

    #[test]
    fn touching_endpoints_are_not_a_conflict() {
        let existing = [booking("salao", "10:30", "11:00", BookingStatus::Confirmada)];
        assert!(find_conflict(&existing, "salao", at("11:00"), at("12:00")).is_none());
        assert!(find_conflict(&existing, "salao", at("09:00"), at("10:30")).is_none());
    }

    #[test]
    fn containment_both_ways_is_a_conflict() {
        let existing = [booking("salao", "10:00", "12:00", BookingStatus::Pendente)];
        assert!(find_conflict(&existing, "salao", at("10:30"), at("11:00")).is_some());
        assert!(find_conflict(&existing, "salao", at("09:00"), at("13:00")).is_some());
    }

    #[test]
    fn cancelled_and_finished_bookings_free_the_slot() {
        let existing = [
            booking("salao", "10:00", "12:00", BookingStatus::Cancelada),
            booking("salao", "10:00", "12:00", BookingStatus::Concluida),
        ];
        assert!(find_conflict(&existing, "salao", at("10:00"), at("12:00")).is_none());
    }

    #[test]
    fn other_spaces_do_not_conflict() {
        let existing = [booking("quadra", "10:00", "12:00", BookingStatus::EmAndamento)];
        assert!(find_conflict(&existing, "salao", at("10:00"), at("12:00")).is_none());
    }

    fn payload(space: Option<&str>, inicio: &str, fim: &str) -> CreateBookingPayload {
        CreateBookingPayload {
            space_slug: space.map(String::from),
            item_codigos: None,
            profile_slug: "ana".into(),
            data_inicio: at(inicio),
            data_fim: at(fim),
            tipo_uso: None,
            finalidade: None,
            numero_pessoas: None,
            status: BookingStatus::Pendente,
            observacoes: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn rejects_overlap_and_accepts_adjacent(pool: PgPool) {
        let service = BookingService::new(BookingRepository::new());
        service.create(&pool, &payload(Some("salao"), "10:30", "11:30")).await.unwrap();

        let err = service
            .create(&pool, &payload(Some("salao"), "10:00", "11:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        service.create(&pool, &payload(Some("salao"), "11:30", "12:30")).await.unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn item_only_bookings_skip_the_check(pool: PgPool) {
        let service = BookingService::new(BookingRepository::new());
        service.create(&pool, &payload(None, "10:00", "11:00")).await.unwrap();
        service.create(&pool, &payload(None, "10:00", "11:00")).await.unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn inverted_interval_is_invalid(pool: PgPool) {
        let service = BookingService::new(BookingRepository::new());
        let err = service
            .create(&pool, &payload(Some("salao"), "12:00", "10:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn concurrent_overlapping_creates_admit_one(pool: PgPool) {
        let service = BookingService::new(BookingRepository::new());

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let (service, pool) = (service.clone(), pool.clone());
                tokio::spawn(async move {
                    service.create(&pool, &payload(Some("salao"), "10:00", "12:00")).await
                })
            })
            .collect();

        let mut aceitas = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => aceitas += 1,
                Err(e) => assert!(matches!(e, AppError::Conflict(_)), "erro inesperado: {e}"),
            }
        }
        assert_eq!(aceitas, 1);

        let filter = BookingFilter { space_slug: Some("salao".into()), ..Default::default() };
        let stored = BookingRepository::new().list(&pool, &filter).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn update_cannot_invert_the_interval(pool: PgPool) {
        let service = BookingService::new(BookingRepository::new());
        let created = service.create(&pool, &payload(Some("salao"), "10:00", "12:00")).await.unwrap();

        let patch = UpdateBookingPayload { data_fim: Some(at("09:00")), ..Default::default() };
        let err = BookingRepository::new().update(&pool, created.id, patch).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let stored = BookingRepository::new().get(&pool, created.id).await.unwrap();
        assert_eq!(stored.data_fim, at("12:00"));
    }
}
