// src/services/enquete_service.rs

use std::collections::BTreeMap;

use sqlx::{Acquire, Postgres};
use tracing::info;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::EnqueteRepository,
    models::enquete::{
        CreateEnquetePayload, Enquete, EnqueteResponse, EnqueteStatus, UpdateEnquetePayload, Votos,
    },
};

/// Aplica um voto em memória: valida estado, opção e cédula do votante,
/// depois incrementa o placar da opção em exatamente 1.
///
/// Em caso de erro a enquete não é alterada.
pub fn cast_vote(enquete: &mut Enquete, opcao_index: i64, votante: &str) -> Result<(), AppError> {
    if enquete.status != EnqueteStatus::Aberta {
        return Err(AppError::InvalidState("Enquete está encerrada".to_string()));
    }
    if opcao_index < 0 || opcao_index as usize >= enquete.opcoes.len() {
        return Err(AppError::InvalidInput("Opção inválida".to_string()));
    }

    match enquete.votantes.0.get_mut(votante) {
        Some(_) if !enquete.multipla_escolha => {
            return Err(AppError::AlreadyVoted("Você já votou nesta enquete".to_string()));
        }
        Some(escolhas) if escolhas.contains(&opcao_index) => {
            return Err(AppError::AlreadyVoted("Você já votou nesta opção".to_string()));
        }
        Some(escolhas) => escolhas.push(opcao_index),
        None => {
            enquete.votantes.0.insert(votante.to_string(), vec![opcao_index]);
        }
    }

    *enquete.votos.0.entry(opcao_index.to_string()).or_insert(0) += 1;
    Ok(())
}

/// Encerrada é terminal: a enquete não volta a ficar aberta.
pub fn check_transition(atual: EnqueteStatus, nova: EnqueteStatus) -> Result<(), AppError> {
    match (atual, nova) {
        (EnqueteStatus::Encerrada, EnqueteStatus::Aberta) => Err(AppError::InvalidState(
            "Enquete encerrada não pode ser reaberta".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Placar inicial: zero para cada índice de opção.
pub fn empty_tally(opcoes: usize) -> Votos {
    (0..opcoes).map(|i| (i.to_string(), 0)).collect::<BTreeMap<_, _>>()
}

#[derive(Clone)]
pub struct EnqueteService {
    repo: EnqueteRepository,
}

impl EnqueteService {
    pub fn new(repo: EnqueteRepository) -> Self {
        Self { repo }
    }

    pub async fn create<'a, A>(&self, conn: A, payload: &CreateEnquetePayload) -> Result<EnqueteResponse, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        if payload.opcoes.len() < 2 {
            return Err(AppError::InvalidInput(
                "Enquete precisa de pelo menos 2 opções".to_string(),
            ));
        }

        let mut conn = conn.acquire().await?;
        let votos = empty_tally(payload.opcoes.len());
        let enquete = self.repo.insert(&mut *conn, payload, &votos).await?;

        Ok(enquete.into())
    }

    /// Registra um voto. Leitura (`FOR UPDATE`), validação e gravação de placar +
    /// cédulas acontecem na mesma transação.
    pub async fn vote<'a, A>(
        &self,
        conn: A,
        id: Uuid,
        opcao_index: i64,
        votante: &str,
    ) -> Result<EnqueteResponse, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let mut enquete = self.repo.get_for_update(&mut *tx, id).await?;
        cast_vote(&mut enquete, opcao_index, votante)?;

        let saved = self
            .repo
            .save_votes(&mut *tx, id, &enquete.votos.0, &enquete.votantes.0)
            .await?;
        tx.commit().await?;

        info!("Voto registrado na enquete {} (opção {})", id, opcao_index);
        Ok(saved.into())
    }

    /// Somente o status é alterável; payload vazio devolve a enquete como está.
    pub async fn update<'a, A>(
        &self,
        conn: A,
        id: Uuid,
        payload: UpdateEnquetePayload,
    ) -> Result<EnqueteResponse, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let Some(status) = payload.status else {
            let mut conn = conn.acquire().await?;
            return Ok(self.repo.get(&mut *conn, id).await?.into());
        };

        let mut tx = conn.begin().await?;

        let current = self.repo.get_for_update(&mut *tx, id).await?;
        check_transition(current.status, status)?;

        let enquete = self.repo.set_status(&mut *tx, id, status).await?;
        tx.commit().await?;

        Ok(enquete.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;
    use sqlx::PgPool;

    fn enquete(multipla_escolha: bool) -> Enquete {
        let now = Utc::now();
        Enquete {
            id: Uuid::new_v4(),
            titulo: "Cor do portão".into(),
            descricao: None,
            categoria: "decisao".into(),
            opcoes: vec!["Preto".into(), "Verde".into(), "Branco".into()],
            votos: Json(empty_tally(3)),
            votantes: Json(BTreeMap::new()),
            criador: None,
            status: EnqueteStatus::Aberta,
            multipla_escolha,
            data_encerramento: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn total(e: &Enquete) -> i64 {
        e.votos.0.values().sum()
    }

    #[test]
    fn single_choice_rejects_second_vote_and_keeps_tally() {
        let mut e = enquete(false);
        cast_vote(&mut e, 0, "ana").unwrap();
        let before = e.clone();

        let err = cast_vote(&mut e, 1, "ana").unwrap_err();

        assert!(matches!(err, AppError::AlreadyVoted(ref m) if m == "Você já votou nesta enquete"));
        assert_eq!(e, before);
        assert_eq!(total(&e), 1);
    }

    #[test]
    fn multiple_choice_allows_each_option_once() {
        let mut e = enquete(true);
        cast_vote(&mut e, 0, "ana").unwrap();
        cast_vote(&mut e, 2, "ana").unwrap();

        let err = cast_vote(&mut e, 0, "ana").unwrap_err();
        assert!(matches!(err, AppError::AlreadyVoted(ref m) if m == "Você já votou nesta opção"));

        assert_eq!(e.votos.0["0"], 1);
        assert_eq!(e.votos.0["2"], 1);
        assert_eq!(e.votantes.0["ana"], vec![0, 2]);
        assert_eq!(total(&e), 2);
    }

    #[test]
    fn closed_poll_rejects_everyone() {
        let mut e = enquete(true);
        e.status = EnqueteStatus::Encerrada;

        let err = cast_vote(&mut e, 0, "novo").unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[test]
    fn out_of_range_index_is_invalid() {
        let mut e = enquete(false);
        assert!(matches!(cast_vote(&mut e, 3, "ana"), Err(AppError::InvalidInput(_))));
        assert!(matches!(cast_vote(&mut e, -1, "ana"), Err(AppError::InvalidInput(_))));
        assert!(e.votantes.0.is_empty());
    }

    #[test]
    fn tally_matches_accepted_votes() {
        let mut e = enquete(true);
        let tentativas = [(0, "a"), (1, "a"), (0, "a"), (2, "b"), (5, "c"), (1, "b"), (2, "b")];

        let aceitos = tentativas
            .iter()
            .filter(|(idx, quem)| cast_vote(&mut e, *idx, quem).is_ok())
            .count() as i64;

        assert_eq!(aceitos, 4);
        assert_eq!(total(&e), aceitos);
    }

    #[test]
    fn closed_is_terminal() {
        use EnqueteStatus::{Aberta, Encerrada};

        assert!(check_transition(Aberta, Encerrada).is_ok());
        assert!(check_transition(Aberta, Aberta).is_ok());
        assert!(check_transition(Encerrada, Encerrada).is_ok());
        assert!(matches!(check_transition(Encerrada, Aberta), Err(AppError::InvalidState(_))));
    }

    fn payload(opcoes: &[&str], multipla_escolha: bool) -> CreateEnquetePayload {
        CreateEnquetePayload {
            titulo: "Churrasco de fim de ano".into(),
            descricao: None,
            categoria: "evento".into(),
            opcoes: opcoes.iter().map(|s| s.to_string()).collect(),
            criador: Some("ana".into()),
            multipla_escolha,
            data_encerramento: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn create_needs_two_options(pool: PgPool) {
        let service = EnqueteService::new(EnqueteRepository::new());
        let err = service.create(&pool, &payload(&["Sim"], false)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let created = service.create(&pool, &payload(&["Sim", "Não"], false)).await.unwrap();
        assert_eq!(created.votos, BTreeMap::from([("0".into(), 0), ("1".into(), 0)]));
        assert_eq!(created.total_votos, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn concurrent_votes_are_not_lost(pool: PgPool) {
        let service = EnqueteService::new(EnqueteRepository::new());
        let created = service.create(&pool, &payload(&["Sim", "Não"], false)).await.unwrap();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let (service, pool) = (service.clone(), pool.clone());
                tokio::spawn(async move {
                    service.vote(&pool, created.id, i % 2, &format!("v{i}")).await
                })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let after = EnqueteResponse::from(EnqueteRepository::new().get(&pool, created.id).await.unwrap());
        assert_eq!(after.total_votos, 10);
        assert_eq!(after.votantes.len(), 10);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn closing_blocks_new_votes(pool: PgPool) {
        let service = EnqueteService::new(EnqueteRepository::new());
        let created = service.create(&pool, &payload(&["Sim", "Não"], false)).await.unwrap();

        let closed = service
            .update(&pool, created.id, UpdateEnquetePayload { status: Some(EnqueteStatus::Encerrada) })
            .await
            .unwrap();
        assert_eq!(closed.status, EnqueteStatus::Encerrada);

        let err = service.vote(&pool, created.id, 0, "ana").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn closed_poll_cannot_be_reopened(pool: PgPool) {
        let service = EnqueteService::new(EnqueteRepository::new());
        let created = service.create(&pool, &payload(&["Sim", "Não"], false)).await.unwrap();
        service
            .update(&pool, created.id, UpdateEnquetePayload { status: Some(EnqueteStatus::Encerrada) })
            .await
            .unwrap();

        let err = service
            .update(&pool, created.id, UpdateEnquetePayload { status: Some(EnqueteStatus::Aberta) })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        let err = service.vote(&pool, created.id, 0, "ana").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        let stored = EnqueteRepository::new().get(&pool, created.id).await.unwrap();
        assert_eq!(stored.status, EnqueteStatus::Encerrada);
    }
}
