// src/models/prestador.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::{self, nullable};
use crate::models::profile::default_true;

// --- Prestador de serviço (eletricista, encanador...) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Prestador {
    pub id: Uuid,
    #[schema(example = "João")]
    pub nome: String,
    #[schema(example = "(11) 98765-4321")]
    pub telefone: String,
    #[schema(example = "eletricista")]
    pub especialidade: Option<String>,
    pub empresa: Option<String>,
    pub notas: Option<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePrestadorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub telefone: String,

    pub especialidade: Option<String>,
    pub empresa: Option<String>,
    pub notas: Option<String>,

    #[serde(default = "default_true")]
    pub ativo: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePrestadorPayload {
    pub nome: Option<String>,
    pub telefone: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub especialidade: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub empresa: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub notas: Option<Option<String>>,
    pub ativo: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrestadorFilter {
    pub ativo: Option<bool>,
    pub especialidade: Option<String>,
}

impl Prestador {
    pub fn apply(&mut self, p: UpdatePrestadorPayload) {
        patch::set(&mut self.nome, p.nome);
        patch::set(&mut self.telefone, p.telefone);
        patch::set(&mut self.especialidade, p.especialidade);
        patch::set(&mut self.empresa, p.empresa);
        patch::set(&mut self.notas, p.notas);
        patch::set(&mut self.ativo, p.ativo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prestador() -> Prestador {
        Prestador {
            id: Uuid::new_v4(),
            nome: "João".into(),
            telefone: "(11) 98765-4321".into(),
            especialidade: Some("eletricista".into()),
            empresa: Some("Luz & Cia".into()),
            notas: None,
            ativo: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn new_phone_leaves_other_fields_alone() {
        let mut p = prestador();
        let original = p.clone();

        p.apply(serde_json::from_value(json!({"telefone": "11 91234-5678"})).unwrap());

        assert_eq!(p.telefone, "11 91234-5678");
        assert_eq!(Prestador { telefone: original.telefone.clone(), ..p }, original);
    }

    #[test]
    fn explicit_null_clears_company_only() {
        let mut p = prestador();

        p.apply(serde_json::from_value(json!({"empresa": null, "ativo": false})).unwrap());

        assert_eq!(p.empresa, None);
        assert!(!p.ativo);
        assert_eq!(p.especialidade.as_deref(), Some("eletricista"));
        assert_eq!(p.nome, "João");
    }
}
