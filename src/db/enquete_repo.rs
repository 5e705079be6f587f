// src/db/enquete_repo.rs

use sqlx::types::Json;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::enquete::{CreateEnquetePayload, Enquete, EnqueteFilter, EnqueteStatus, Votantes, Votos},
};

const COLUMNS: &str = "id, titulo, descricao, categoria, opcoes, votos, votantes, criador, status, \
                       multipla_escolha, data_encerramento, created_at, updated_at";

#[derive(Clone, Default)]
pub struct EnqueteRepository;

impl EnqueteRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &EnqueteFilter) -> Result<Vec<Enquete>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM enquetes
            WHERE ($1::enquete_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR categoria = $2)
            ORDER BY created_at DESC
            "#
        );
        let enquetes = sqlx::query_as::<_, Enquete>(&sql)
            .bind(filter.status)
            .bind(filter.categoria.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(enquetes)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Enquete, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM enquetes WHERE id = $1");
        sqlx::query_as::<_, Enquete>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found("Enquete", id))
    }

    /// Mesma leitura de `get`, travando a linha até o fim da transação.
    pub async fn get_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<Enquete, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM enquetes WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Enquete>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found("Enquete", id))
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        p: &CreateEnquetePayload,
        votos: &Votos,
    ) -> Result<Enquete, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO enquetes (
                titulo, descricao, categoria, opcoes, votos, votantes, criador,
                multipla_escolha, data_encerramento
            )
            VALUES ($1, $2, $3, $4, $5, '{{}}'::jsonb, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        );
        let enquete = sqlx::query_as::<_, Enquete>(&sql)
            .bind(&p.titulo)
            .bind(&p.descricao)
            .bind(&p.categoria)
            .bind(&p.opcoes)
            .bind(Json(votos))
            .bind(&p.criador)
            .bind(p.multipla_escolha)
            .bind(p.data_encerramento)
            .fetch_one(executor)
            .await?;

        Ok(enquete)
    }

    /// Placar e cédulas são gravados juntos, num único `UPDATE`.
    pub async fn save_votes<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        votos: &Votos,
        votantes: &Votantes,
    ) -> Result<Enquete, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE enquetes
            SET votos = $2, votantes = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let enquete = sqlx::query_as::<_, Enquete>(&sql)
            .bind(id)
            .bind(Json(votos))
            .bind(Json(votantes))
            .fetch_one(executor)
            .await?;

        Ok(enquete)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: EnqueteStatus,
    ) -> Result<Enquete, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE enquetes
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, Enquete>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found("Enquete", id))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM enquetes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Enquete", id));
        }
        Ok(())
    }
}
