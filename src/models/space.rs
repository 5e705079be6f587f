// src/models/space.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::{self, nullable};

// --- Espaço físico compartilhado (salão, quadra, churrasqueira...) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Space {
    pub id: Uuid,
    #[schema(example = "salao-de-festas")]
    pub slug: String,
    #[schema(example = "Salão de Festas")]
    pub nome: String,
    pub tipo: Option<String>,
    #[schema(example = 80)]
    pub capacidade: Option<i32>,
    pub area_m2: Option<f64>,
    // Objeto livre: { "churrasqueira": true, "tomadas": 6 }
    pub caracteristicas: Option<Value>,
    pub regras_uso: Option<String>,
    pub instrucoes_acesso: Option<String>,
    pub fotos: Option<Vec<String>>,
    pub responsavel_slug: Option<String>,
    #[schema(example = "ativo")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSpacePayload {
    #[validate(length(min = 1, message = "O slug é obrigatório."))]
    pub slug: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    pub tipo: Option<String>,

    #[validate(range(min = 0, message = "A capacidade não pode ser negativa."))]
    pub capacidade: Option<i32>,

    pub area_m2: Option<f64>,
    pub caracteristicas: Option<Value>,
    pub regras_uso: Option<String>,
    pub instrucoes_acesso: Option<String>,
    pub fotos: Option<Vec<String>>,
    pub responsavel_slug: Option<String>,

    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSpacePayload {
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub tipo: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub capacidade: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub area_m2: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Object>)]
    pub caracteristicas: Option<Option<Value>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub regras_uso: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub instrucoes_acesso: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Vec<String>>)]
    pub fotos: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub responsavel_slug: Option<Option<String>>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpaceFilter {
    pub status: Option<String>,
    pub tipo: Option<String>,
}

impl Space {
    pub fn apply(&mut self, p: UpdateSpacePayload) {
        patch::set(&mut self.nome, p.nome);
        patch::set(&mut self.tipo, p.tipo);
        patch::set(&mut self.capacidade, p.capacidade);
        patch::set(&mut self.area_m2, p.area_m2);
        patch::set(&mut self.caracteristicas, p.caracteristicas);
        patch::set(&mut self.regras_uso, p.regras_uso);
        patch::set(&mut self.instrucoes_acesso, p.instrucoes_acesso);
        patch::set(&mut self.fotos, p.fotos);
        patch::set(&mut self.responsavel_slug, p.responsavel_slug);
        patch::set(&mut self.status, p.status);
    }
}

fn default_status() -> String {
    "ativo".to_string()
}
