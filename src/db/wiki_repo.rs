// src/db/wiki_repo.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::wiki::{CreateWikiPayload, UpdateWikiPayload, WikiArticle, WikiFilter},
};

const COLUMNS: &str = "id, slug, titulo, categoria, conteudo, resumo_ia, entidades, materiais, \
                       dificuldade, tempo_execucao_horas, autor_slug, validado, created_at, updated_at";

#[derive(Clone, Default)]
pub struct WikiRepository;

impl WikiRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &WikiFilter) -> Result<Vec<WikiArticle>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM wiki_articles
            WHERE ($1::text IS NULL OR categoria = $1)
            ORDER BY titulo ASC
            "#
        );
        let artigos = sqlx::query_as::<_, WikiArticle>(&sql)
            .bind(filter.categoria.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(artigos)
    }

    pub async fn get<'e, E>(&self, executor: E, slug: &str) -> Result<WikiArticle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM wiki_articles WHERE slug = $1");
        sqlx::query_as::<_, WikiArticle>(&sql)
            .bind(slug)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found("Artigo", slug))
    }

    pub async fn create<'e, E>(&self, executor: E, p: &CreateWikiPayload) -> Result<WikiArticle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO wiki_articles (
                slug, titulo, categoria, conteudo, resumo_ia, entidades, materiais,
                dificuldade, tempo_execucao_horas, autor_slug, validado
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, WikiArticle>(&sql)
            .bind(&p.slug)
            .bind(&p.titulo)
            .bind(&p.categoria)
            .bind(&p.conteudo)
            .bind(&p.resumo_ia)
            .bind(&p.entidades)
            .bind(&p.materiais)
            .bind(p.dificuldade)
            .bind(p.tempo_execucao_horas)
            .bind(&p.autor_slug)
            .bind(p.validado)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                AppError::from_unique_violation(e, || {
                    format!("Já existe um artigo com o slug '{}'.", p.slug)
                })
            })
    }

    pub async fn update<'a, A>(
        &self,
        conn: A,
        slug: &str,
        patch: UpdateWikiPayload,
    ) -> Result<WikiArticle, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let sql = format!("SELECT {COLUMNS} FROM wiki_articles WHERE slug = $1 FOR UPDATE");
        let mut artigo = sqlx::query_as::<_, WikiArticle>(&sql)
            .bind(slug)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Artigo", slug))?;

        artigo.apply(patch);

        let sql = format!(
            r#"
            UPDATE wiki_articles
            SET titulo = $2, categoria = $3, conteudo = $4, resumo_ia = $5, entidades = $6,
                materiais = $7, dificuldade = $8, tempo_execucao_horas = $9, autor_slug = $10,
                validado = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, WikiArticle>(&sql)
            .bind(artigo.id)
            .bind(&artigo.titulo)
            .bind(&artigo.categoria)
            .bind(&artigo.conteudo)
            .bind(&artigo.resumo_ia)
            .bind(&artigo.entidades)
            .bind(&artigo.materiais)
            .bind(artigo.dificuldade)
            .bind(artigo.tempo_execucao_horas)
            .bind(&artigo.autor_slug)
            .bind(artigo.validado)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, slug: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM wiki_articles WHERE slug = $1")
            .bind(slug)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Artigo", slug));
        }
        Ok(())
    }
}
