// src/models/enquete.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Placar: índice da opção (como string) -> número de votos.
pub type Votos = BTreeMap<String, i64>;
// Cédulas: votante -> índices escolhidos.
pub type Votantes = BTreeMap<String, Vec<i64>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "enquete_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EnqueteStatus {
    #[default]
    Aberta,
    Encerrada,
}

// --- Linha da tabela `enquetes` ---
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Enquete {
    pub id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub categoria: String,
    pub opcoes: Vec<String>,
    pub votos: Json<Votos>,
    pub votantes: Json<Votantes>,
    pub criador: Option<String>,
    pub status: EnqueteStatus,
    pub multipla_escolha: bool,
    pub data_encerramento: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Projeção devolvida pela API ---
// `total_votos` é sempre recalculado a partir do placar, nunca armazenado.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EnqueteResponse {
    pub id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub categoria: String,
    pub opcoes: Vec<String>,
    #[schema(value_type = Object, example = json!({"0": 3, "1": 1}))]
    pub votos: Votos,
    #[schema(value_type = Object, example = json!({"ana": [0]}))]
    pub votantes: Votantes,
    pub criador: Option<String>,
    pub status: EnqueteStatus,
    pub multipla_escolha: bool,
    pub total_votos: i64,
    pub data_encerramento: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Enquete> for EnqueteResponse {
    fn from(e: Enquete) -> Self {
        let total_votos = e.votos.0.values().sum();
        EnqueteResponse {
            id: e.id,
            titulo: e.titulo,
            descricao: e.descricao,
            categoria: e.categoria,
            opcoes: e.opcoes,
            votos: e.votos.0,
            votantes: e.votantes.0,
            criador: e.criador,
            status: e.status,
            multipla_escolha: e.multipla_escolha,
            total_votos,
            data_encerramento: e.data_encerramento,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEnquetePayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub titulo: String,

    pub descricao: Option<String>,

    #[serde(default = "default_categoria")]
    pub categoria: String,

    #[schema(example = json!(["Sim", "Não"]))]
    pub opcoes: Vec<String>,

    pub criador: Option<String>,

    #[serde(default)]
    pub multipla_escolha: bool,

    pub data_encerramento: Option<DateTime<Utc>>,
}

// Só o status é editável (aberta -> encerrada).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEnquetePayload {
    pub status: Option<EnqueteStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VotoPayload {
    #[schema(example = 0)]
    pub opcao_index: i64,

    #[validate(length(min = 1, message = "O votante é obrigatório."))]
    #[schema(example = "ana")]
    pub votante: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EnqueteFilter {
    pub status: Option<EnqueteStatus>,
    pub categoria: Option<String>,
}

fn default_categoria() -> String {
    "decisao".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_recomputed_from_the_tally() {
        let now = Utc::now();
        let enquete = Enquete {
            id: Uuid::new_v4(),
            titulo: "Pintura do salão".into(),
            descricao: None,
            categoria: "decisao".into(),
            opcoes: vec!["Branco".into(), "Azul".into(), "Verde".into()],
            votos: Json(BTreeMap::from([
                ("0".to_string(), 2),
                ("1".to_string(), 5),
                ("2".to_string(), 0),
            ])),
            votantes: Json(BTreeMap::new()),
            criador: None,
            status: EnqueteStatus::Aberta,
            multipla_escolha: false,
            data_encerramento: None,
            created_at: now,
            updated_at: now,
        };

        let response = EnqueteResponse::from(enquete);
        assert_eq!(response.total_votos, 7);
    }

    #[test]
    fn create_payload_defaults() {
        let payload: CreateEnquetePayload =
            serde_json::from_str(r#"{"titulo": "Festa junina?", "opcoes": ["Sim", "Não"]}"#)
                .unwrap();
        assert_eq!(payload.categoria, "decisao");
        assert!(!payload.multipla_escolha);
    }
}
