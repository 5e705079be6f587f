// src/db/space_repo.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::space::{CreateSpacePayload, Space, SpaceFilter, UpdateSpacePayload},
};

const COLUMNS: &str = "id, slug, nome, tipo, capacidade, area_m2, caracteristicas, regras_uso, \
                       instrucoes_acesso, fotos, responsavel_slug, status, created_at";

#[derive(Clone, Default)]
pub struct SpaceRepository;

impl SpaceRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &SpaceFilter) -> Result<Vec<Space>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM spaces
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR tipo = $2)
            ORDER BY nome ASC
            "#
        );
        let spaces = sqlx::query_as::<_, Space>(&sql)
            .bind(filter.status.as_deref())
            .bind(filter.tipo.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(spaces)
    }

    pub async fn get<'e, E>(&self, executor: E, slug: &str) -> Result<Space, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM spaces WHERE slug = $1");
        sqlx::query_as::<_, Space>(&sql)
            .bind(slug)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found("Espaço", slug))
    }

    pub async fn create<'e, E>(&self, executor: E, p: &CreateSpacePayload) -> Result<Space, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO spaces (
                slug, nome, tipo, capacidade, area_m2, caracteristicas, regras_uso,
                instrucoes_acesso, fotos, responsavel_slug, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, Space>(&sql)
            .bind(&p.slug)
            .bind(&p.nome)
            .bind(&p.tipo)
            .bind(p.capacidade)
            .bind(p.area_m2)
            .bind(&p.caracteristicas)
            .bind(&p.regras_uso)
            .bind(&p.instrucoes_acesso)
            .bind(&p.fotos)
            .bind(&p.responsavel_slug)
            .bind(&p.status)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                AppError::from_unique_violation(e, || {
                    format!("Já existe um espaço com o slug '{}'.", p.slug)
                })
            })
    }

    pub async fn update<'a, A>(
        &self,
        conn: A,
        slug: &str,
        patch: UpdateSpacePayload,
    ) -> Result<Space, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let sql = format!("SELECT {COLUMNS} FROM spaces WHERE slug = $1 FOR UPDATE");
        let mut space = sqlx::query_as::<_, Space>(&sql)
            .bind(slug)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Espaço", slug))?;

        space.apply(patch);

        let sql = format!(
            r#"
            UPDATE spaces
            SET nome = $2, tipo = $3, capacidade = $4, area_m2 = $5, caracteristicas = $6,
                regras_uso = $7, instrucoes_acesso = $8, fotos = $9, responsavel_slug = $10,
                status = $11
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Space>(&sql)
            .bind(space.id)
            .bind(&space.nome)
            .bind(&space.tipo)
            .bind(space.capacidade)
            .bind(space.area_m2)
            .bind(&space.caracteristicas)
            .bind(&space.regras_uso)
            .bind(&space.instrucoes_acesso)
            .bind(&space.fotos)
            .bind(&space.responsavel_slug)
            .bind(&space.status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, slug: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM spaces WHERE slug = $1")
            .bind(slug)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Espaço", slug));
        }
        Ok(())
    }
}
