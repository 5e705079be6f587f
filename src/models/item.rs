// src/models/item.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::{self, nullable};

// --- Item do inventário comunitário ---
// O `codigo` é a chave pública (ex: "cozinha.panela_02").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub id: Uuid,
    #[schema(example = "cozinha.panela")]
    pub codigo: String,
    #[schema(example = "Panela de pressão")]
    pub nome: String,
    pub descricao: Option<String>,
    pub space_slug: Option<String>,
    pub container_especifico: Option<String>,
    pub categoria: Option<String>,
    #[schema(example = "bom")]
    pub estado: String,
    pub manual_cuidados: Option<String>,
    pub ciclo_manutencao: Option<String>,
    pub ultima_manutencao: Option<NaiveDate>,
    pub proxima_manutencao: Option<NaiveDate>,
    pub vezes_usado: i32,
    pub tags: Option<Vec<String>>,
    pub fotos: Option<Vec<String>>,
    pub qr_code_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItemPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub codigo: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    pub descricao: Option<String>,
    pub space_slug: Option<String>,
    pub container_especifico: Option<String>,
    pub categoria: Option<String>,

    #[serde(default = "default_estado")]
    pub estado: String,

    pub manual_cuidados: Option<String>,
    pub ciclo_manutencao: Option<String>,
    pub ultima_manutencao: Option<NaiveDate>,
    pub proxima_manutencao: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
    pub fotos: Option<Vec<String>>,
    pub qr_code_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateItemPayload {
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub descricao: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub space_slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub container_especifico: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub categoria: Option<Option<String>>,
    pub estado: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub manual_cuidados: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub ciclo_manutencao: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub ultima_manutencao: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub proxima_manutencao: Option<Option<NaiveDate>>,
    pub vezes_usado: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Vec<String>>)]
    pub fotos: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub qr_code_url: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemFilter {
    pub categoria: Option<String>,
    pub estado: Option<String>,
    pub space_slug: Option<String>,
}

impl Item {
    pub fn apply(&mut self, p: UpdateItemPayload) {
        patch::set(&mut self.nome, p.nome);
        patch::set(&mut self.descricao, p.descricao);
        patch::set(&mut self.space_slug, p.space_slug);
        patch::set(&mut self.container_especifico, p.container_especifico);
        patch::set(&mut self.categoria, p.categoria);
        patch::set(&mut self.estado, p.estado);
        patch::set(&mut self.manual_cuidados, p.manual_cuidados);
        patch::set(&mut self.ciclo_manutencao, p.ciclo_manutencao);
        patch::set(&mut self.ultima_manutencao, p.ultima_manutencao);
        patch::set(&mut self.proxima_manutencao, p.proxima_manutencao);
        patch::set(&mut self.vezes_usado, p.vezes_usado);
        patch::set(&mut self.tags, p.tags);
        patch::set(&mut self.fotos, p.fotos);
        patch::set(&mut self.qr_code_url, p.qr_code_url);
    }
}

fn default_estado() -> String {
    "bom".to_string()
}
