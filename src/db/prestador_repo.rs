// src/db/prestador_repo.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::prestador::{CreatePrestadorPayload, Prestador, PrestadorFilter, UpdatePrestadorPayload},
};

const COLUMNS: &str = "id, nome, telefone, especialidade, empresa, notas, ativo, created_at";

#[derive(Clone, Default)]
pub struct PrestadorRepository;

impl PrestadorRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &PrestadorFilter) -> Result<Vec<Prestador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM prestadores
            WHERE ($1::bool IS NULL OR ativo = $1)
              AND ($2::text IS NULL OR especialidade = $2)
            ORDER BY nome ASC
            "#
        );
        let prestadores = sqlx::query_as::<_, Prestador>(&sql)
            .bind(filter.ativo)
            .bind(filter.especialidade.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(prestadores)
    }

    pub async fn find<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Prestador>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM prestadores WHERE id = $1");
        let prestador = sqlx::query_as::<_, Prestador>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(prestador)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Prestador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.find(executor, id)
            .await?
            .ok_or_else(|| AppError::not_found("Prestador", id))
    }

    pub async fn create<'e, E>(&self, executor: E, p: &CreatePrestadorPayload) -> Result<Prestador, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO prestadores (nome, telefone, especialidade, empresa, notas, ativo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        );
        let prestador = sqlx::query_as::<_, Prestador>(&sql)
            .bind(&p.nome)
            .bind(&p.telefone)
            .bind(&p.especialidade)
            .bind(&p.empresa)
            .bind(&p.notas)
            .bind(p.ativo)
            .fetch_one(executor)
            .await?;

        Ok(prestador)
    }

    pub async fn update<'a, A>(
        &self,
        conn: A,
        id: Uuid,
        patch: UpdatePrestadorPayload,
    ) -> Result<Prestador, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let sql = format!("SELECT {COLUMNS} FROM prestadores WHERE id = $1 FOR UPDATE");
        let mut prestador = sqlx::query_as::<_, Prestador>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Prestador", id))?;

        prestador.apply(patch);

        let sql = format!(
            r#"
            UPDATE prestadores
            SET nome = $2, telefone = $3, especialidade = $4, empresa = $5, notas = $6, ativo = $7
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Prestador>(&sql)
            .bind(prestador.id)
            .bind(&prestador.nome)
            .bind(&prestador.telefone)
            .bind(&prestador.especialidade)
            .bind(&prestador.empresa)
            .bind(&prestador.notas)
            .bind(prestador.ativo)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM prestadores WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Prestador", id));
        }
        Ok(())
    }
}
