// src/db/item_repo.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::item::{CreateItemPayload, Item, ItemFilter, UpdateItemPayload},
};

const COLUMNS: &str = "id, codigo, nome, descricao, space_slug, container_especifico, categoria, \
                       estado, manual_cuidados, ciclo_manutencao, ultima_manutencao, \
                       proxima_manutencao, vezes_usado, tags, fotos, qr_code_url, created_at";

#[derive(Clone, Default)]
pub struct ItemRepository;

impl ItemRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &ItemFilter) -> Result<Vec<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM items
            WHERE ($1::text IS NULL OR categoria = $1)
              AND ($2::text IS NULL OR estado = $2)
              AND ($3::text IS NULL OR space_slug = $3)
            ORDER BY nome ASC
            "#
        );
        let items = sqlx::query_as::<_, Item>(&sql)
            .bind(filter.categoria.as_deref())
            .bind(filter.estado.as_deref())
            .bind(filter.space_slug.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(items)
    }

    pub async fn find<'e, E>(&self, executor: E, codigo: &str) -> Result<Option<Item>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM items WHERE codigo = $1");
        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(codigo)
            .fetch_optional(executor)
            .await?;

        Ok(item)
    }

    pub async fn get<'e, E>(&self, executor: E, codigo: &str) -> Result<Item, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.find(executor, codigo)
            .await?
            .ok_or_else(|| AppError::not_found("Item", codigo))
    }

    pub async fn create<'e, E>(&self, executor: E, p: &CreateItemPayload) -> Result<Item, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO items (
                codigo, nome, descricao, space_slug, container_especifico, categoria, estado,
                manual_cuidados, ciclo_manutencao, ultima_manutencao, proxima_manutencao,
                tags, fotos, qr_code_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, Item>(&sql)
            .bind(&p.codigo)
            .bind(&p.nome)
            .bind(&p.descricao)
            .bind(&p.space_slug)
            .bind(&p.container_especifico)
            .bind(&p.categoria)
            .bind(&p.estado)
            .bind(&p.manual_cuidados)
            .bind(&p.ciclo_manutencao)
            .bind(p.ultima_manutencao)
            .bind(p.proxima_manutencao)
            .bind(&p.tags)
            .bind(&p.fotos)
            .bind(&p.qr_code_url)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                AppError::from_unique_violation(e, || {
                    format!("Já existe um item com o código '{}'.", p.codigo)
                })
            })
    }

    /// Grava a linha inteira (já mesclada) de volta no banco.
    pub async fn save<'e, E>(&self, executor: E, item: &Item) -> Result<Item, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE items
            SET nome = $2, descricao = $3, space_slug = $4, container_especifico = $5,
                categoria = $6, estado = $7, manual_cuidados = $8, ciclo_manutencao = $9,
                ultima_manutencao = $10, proxima_manutencao = $11, vezes_usado = $12,
                tags = $13, fotos = $14, qr_code_url = $15
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let saved = sqlx::query_as::<_, Item>(&sql)
            .bind(item.id)
            .bind(&item.nome)
            .bind(&item.descricao)
            .bind(&item.space_slug)
            .bind(&item.container_especifico)
            .bind(&item.categoria)
            .bind(&item.estado)
            .bind(&item.manual_cuidados)
            .bind(&item.ciclo_manutencao)
            .bind(item.ultima_manutencao)
            .bind(item.proxima_manutencao)
            .bind(item.vezes_usado)
            .bind(&item.tags)
            .bind(&item.fotos)
            .bind(&item.qr_code_url)
            .fetch_one(executor)
            .await?;

        Ok(saved)
    }

    pub async fn update<'a, A>(
        &self,
        conn: A,
        codigo: &str,
        patch: UpdateItemPayload,
    ) -> Result<Item, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let sql = format!("SELECT {COLUMNS} FROM items WHERE codigo = $1 FOR UPDATE");
        let mut item = sqlx::query_as::<_, Item>(&sql)
            .bind(codigo)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Item", codigo))?;

        item.apply(patch);
        let updated = self.save(&mut *tx, &item).await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, codigo: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM items WHERE codigo = $1")
            .bind(codigo)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Item", codigo));
        }
        Ok(())
    }
}
