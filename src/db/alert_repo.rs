// src/db/alert_repo.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::alert::{Alert, AlertFilter, CreateAlertPayload, UpdateAlertPayload},
};

const COLUMNS: &str =
    "id, tipo, profile_slug, titulo, mensagem, dados_json, lido, data_acao, created_at";

#[derive(Clone, Default)]
pub struct AlertRepository;

impl AlertRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &AlertFilter) -> Result<Vec<Alert>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM alerts
            WHERE ($1::text IS NULL OR profile_slug = $1)
              AND ($2::bool IS NULL OR lido = $2)
              AND ($3::text IS NULL OR tipo = $3)
            ORDER BY created_at DESC
            "#
        );
        let alerts = sqlx::query_as::<_, Alert>(&sql)
            .bind(filter.profile_slug.as_deref())
            .bind(filter.lido)
            .bind(filter.tipo.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(alerts)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Alert, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found("Alerta", id))
    }

    pub async fn create<'e, E>(&self, executor: E, p: &CreateAlertPayload) -> Result<Alert, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO alerts (tipo, profile_slug, titulo, mensagem, dados_json, data_acao)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        );
        let alert = sqlx::query_as::<_, Alert>(&sql)
            .bind(&p.tipo)
            .bind(&p.profile_slug)
            .bind(&p.titulo)
            .bind(&p.mensagem)
            .bind(&p.dados_json)
            .bind(p.data_acao)
            .fetch_one(executor)
            .await?;

        Ok(alert)
    }

    pub async fn update<'a, A>(
        &self,
        conn: A,
        id: Uuid,
        patch: UpdateAlertPayload,
    ) -> Result<Alert, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let sql = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1 FOR UPDATE");
        let mut alert = sqlx::query_as::<_, Alert>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Alerta", id))?;

        alert.apply(patch);

        let sql = format!(
            r#"
            UPDATE alerts SET lido = $2, titulo = $3, mensagem = $4
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Alert>(&sql)
            .bind(alert.id)
            .bind(alert.lido)
            .bind(&alert.titulo)
            .bind(&alert.mensagem)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Alerta", id));
        }
        Ok(())
    }
}
