// src/db/log_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::log::{CreateLogPayload, Log, LogFilter},
};

const COLUMNS: &str = "id, item_codigo, acao, profile_slug, booking_id, timestamp, local_uso, \
                       condicao_saida, condicao_retorno, descricao_incidente, fotos_evidencia, \
                       clima, sazonalidade";

// Logs são somente inclusão: sem update nem delete.
#[derive(Clone, Default)]
pub struct LogRepository;

impl LogRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &LogFilter) -> Result<Vec<Log>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM logs
            WHERE ($1::text IS NULL OR item_codigo = $1)
              AND ($2::text IS NULL OR profile_slug = $2)
              AND ($3::text IS NULL OR acao = $3)
            ORDER BY timestamp DESC
            "#
        );
        let logs = sqlx::query_as::<_, Log>(&sql)
            .bind(filter.item_codigo.as_deref())
            .bind(filter.profile_slug.as_deref())
            .bind(filter.acao.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(logs)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Log, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM logs WHERE id = $1");
        sqlx::query_as::<_, Log>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found("Log", id))
    }

    pub async fn create<'e, E>(&self, executor: E, p: &CreateLogPayload) -> Result<Log, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO logs (
                item_codigo, acao, profile_slug, booking_id, local_uso, condicao_saida,
                condicao_retorno, descricao_incidente, fotos_evidencia, clima, sazonalidade
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "#
        );
        let log = sqlx::query_as::<_, Log>(&sql)
            .bind(&p.item_codigo)
            .bind(&p.acao)
            .bind(&p.profile_slug)
            .bind(&p.booking_id)
            .bind(&p.local_uso)
            .bind(&p.condicao_saida)
            .bind(&p.condicao_retorno)
            .bind(&p.descricao_incidente)
            .bind(&p.fotos_evidencia)
            .bind(&p.clima)
            .bind(&p.sazonalidade)
            .fetch_one(executor)
            .await?;

        Ok(log)
    }
}
