// src/db/chamado_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::chamado::{Chamado, ChamadoFilter, UpdateChamadoPayload},
};

const COLUMNS: &str = "id, numero, estrutura, area, descricao, prioridade, tipo, prestador_id, \
                       prestador_nome, prestador_telefone, solicitante, mensagem_enviada, status, \
                       resolucao, created_at, updated_at";

/// Dados já resolvidos para gravar um novo chamado.
#[derive(Debug, Clone)]
pub struct NewChamado<'a> {
    pub numero: i32,
    pub estrutura: &'a str,
    pub area: Option<&'a str>,
    pub descricao: &'a str,
    pub prioridade: &'a str,
    pub tipo: &'a str,
    pub prestador_id: Option<Uuid>,
    pub prestador_nome: Option<&'a str>,
    pub prestador_telefone: Option<&'a str>,
    pub solicitante: Option<&'a str>,
    pub mensagem_enviada: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct ChamadoRepository;

impl ChamadoRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &ChamadoFilter) -> Result<Vec<Chamado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM chamados
            WHERE ($1::chamado_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR prioridade = $2)
            ORDER BY created_at DESC
            "#
        );
        let chamados = sqlx::query_as::<_, Chamado>(&sql)
            .bind(filter.status)
            .bind(filter.prioridade.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(chamados)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Chamado, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM chamados WHERE id = $1");
        sqlx::query_as::<_, Chamado>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found("Chamado", id))
    }

    /// Reserva o próximo número de chamado.
    ///
    /// O `UPDATE` trava a linha do contador até o fim da transação, então criações
    /// concorrentes são serializadas aqui. O contador só cresce: excluir o último
    /// chamado não libera o número dele.
    pub async fn next_numero<'e, E>(&self, executor: E) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let numero: i32 = sqlx::query_scalar(
            r#"
            UPDATE chamado_numeracao
            SET ultimo_numero = GREATEST(
                ultimo_numero,
                (SELECT COALESCE(MAX(numero), 0) FROM chamados)
            ) + 1
            WHERE id = 1
            RETURNING ultimo_numero
            "#,
        )
        .fetch_one(executor)
        .await?;

        Ok(numero)
    }

    pub async fn insert<'e, E>(&self, executor: E, c: &NewChamado<'_>) -> Result<Chamado, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO chamados (
                numero, estrutura, area, descricao, prioridade, tipo, prestador_id,
                prestador_nome, prestador_telefone, solicitante, mensagem_enviada,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, Chamado>(&sql)
            .bind(c.numero)
            .bind(c.estrutura)
            .bind(c.area)
            .bind(c.descricao)
            .bind(c.prioridade)
            .bind(c.tipo)
            .bind(c.prestador_id)
            .bind(c.prestador_nome)
            .bind(c.prestador_telefone)
            .bind(c.solicitante)
            .bind(c.mensagem_enviada)
            .bind(c.created_at)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                AppError::from_unique_violation(e, || {
                    format!("O número de chamado #{:03} já está em uso.", c.numero)
                })
            })
    }

    pub async fn update<'a, A>(
        &self,
        conn: A,
        id: Uuid,
        patch: UpdateChamadoPayload,
    ) -> Result<Chamado, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let sql = format!("SELECT {COLUMNS} FROM chamados WHERE id = $1 FOR UPDATE");
        let mut chamado = sqlx::query_as::<_, Chamado>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Chamado", id))?;

        chamado.apply(patch);

        let sql = format!(
            r#"
            UPDATE chamados
            SET status = $2, resolucao = $3, prioridade = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Chamado>(&sql)
            .bind(chamado.id)
            .bind(chamado.status)
            .bind(&chamado.resolucao)
            .bind(&chamado.prioridade)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM chamados WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Chamado", id));
        }
        Ok(())
    }
}
