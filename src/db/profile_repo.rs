// src/db/profile_repo.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::profile::{CreateProfilePayload, Profile, ProfileFilter, UpdateProfilePayload},
};

const COLUMNS: &str =
    "id, slug, nome_completo, nome_curto, email, telefone, role, lote, ativo, created_at";

#[derive(Clone, Default)]
pub struct ProfileRepository;

impl ProfileRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &ProfileFilter) -> Result<Vec<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM profiles
            WHERE ($1::bool IS NULL OR ativo = $1)
              AND ($2::text IS NULL OR role = $2)
            ORDER BY nome_completo ASC
            "#
        );
        let profiles = sqlx::query_as::<_, Profile>(&sql)
            .bind(filter.ativo)
            .bind(filter.role.as_deref())
            .fetch_all(executor)
            .await?;

        Ok(profiles)
    }

    pub async fn find<'e, E>(&self, executor: E, slug: &str) -> Result<Option<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {COLUMNS} FROM profiles WHERE slug = $1");
        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(slug)
            .fetch_optional(executor)
            .await?;

        Ok(profile)
    }

    pub async fn get<'e, E>(&self, executor: E, slug: &str) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.find(executor, slug)
            .await?
            .ok_or_else(|| AppError::not_found("Perfil", slug))
    }

    pub async fn create<'e, E>(&self, executor: E, p: &CreateProfilePayload) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO profiles (slug, nome_completo, nome_curto, email, telefone, role, lote, ativo)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(&p.slug)
            .bind(&p.nome_completo)
            .bind(&p.nome_curto)
            .bind(&p.email)
            .bind(&p.telefone)
            .bind(&p.role)
            .bind(&p.lote)
            .bind(p.ativo)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                AppError::from_unique_violation(e, || {
                    format!("Já existe um perfil com o slug '{}' ou este e-mail.", p.slug)
                })
            })
    }

    /// Lê com `FOR UPDATE`, aplica o merge e grava a linha inteira na mesma transação.
    pub async fn update<'a, A>(
        &self,
        conn: A,
        slug: &str,
        patch: UpdateProfilePayload,
    ) -> Result<Profile, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let sql = format!("SELECT {COLUMNS} FROM profiles WHERE slug = $1 FOR UPDATE");
        let mut profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(slug)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Perfil", slug))?;

        profile.apply(patch);

        let sql = format!(
            r#"
            UPDATE profiles
            SET nome_completo = $2, nome_curto = $3, email = $4, telefone = $5,
                role = $6, lote = $7, ativo = $8
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Profile>(&sql)
            .bind(profile.id)
            .bind(&profile.nome_completo)
            .bind(&profile.nome_curto)
            .bind(&profile.email)
            .bind(&profile.telefone)
            .bind(&profile.role)
            .bind(&profile.lote)
            .bind(profile.ativo)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::from_unique_violation(e, || "Este e-mail já está em uso.".to_string())
            })?;

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, slug: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM profiles WHERE slug = $1")
            .bind(slug)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Perfil", slug));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn payload(slug: &str, email: Option<&str>) -> CreateProfilePayload {
        CreateProfilePayload {
            slug: slug.into(),
            nome_completo: format!("Pessoa {slug}"),
            nome_curto: None,
            email: email.map(String::from),
            telefone: None,
            role: Some("morador".into()),
            lote: None,
            ativo: true,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn duplicate_slug_is_a_conflict(pool: PgPool) {
        let repo = ProfileRepository::new();
        repo.create(&pool, &payload("ana", None)).await.unwrap();

        let err = repo.create(&pool, &payload("ana", None)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn partial_update_round_trip(pool: PgPool) {
        let repo = ProfileRepository::new();
        let before = repo.create(&pool, &payload("bia", Some("bia@x.com"))).await.unwrap();

        let patch: UpdateProfilePayload = serde_json::from_str(r#"{"lote": "7"}"#).unwrap();
        let after = repo.update(&pool, "bia", patch).await.unwrap();

        assert_eq!(after.lote.as_deref(), Some("7"));
        assert_eq!(Profile { lote: None, ..after }, before);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn filters_and_ordering(pool: PgPool) {
        let repo = ProfileRepository::new();
        repo.create(&pool, &payload("zeca", None)).await.unwrap();
        repo.create(&pool, &payload("ana", None)).await.unwrap();
        let mut inativo = payload("caio", None);
        inativo.ativo = false;
        repo.create(&pool, &inativo).await.unwrap();

        let ativos = repo
            .list(&pool, &ProfileFilter { ativo: Some(true), role: None })
            .await
            .unwrap();
        let slugs: Vec<_> = ativos.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["ana", "zeca"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn deleting_unknown_slug_is_not_found(pool: PgPool) {
        let err = ProfileRepository::new().delete(&pool, "ninguem").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
