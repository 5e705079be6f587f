// src/models/wiki.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::{self, nullable};

// --- Artigo da base de conhecimento ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WikiArticle {
    pub id: Uuid,
    #[schema(example = "trocar-resistencia-chuveiro")]
    pub slug: String,
    pub titulo: String,
    pub categoria: Option<String>,
    pub conteudo: String,
    pub resumo_ia: Option<String>,
    pub entidades: Option<Vec<String>>,
    // Lista de objetos: [{ "nome": "fita isolante", "qtd": 1 }]
    #[schema(value_type = Option<Vec<Object>>)]
    pub materiais: Option<Value>,
    pub dificuldade: Option<i32>,
    pub tempo_execucao_horas: Option<i32>,
    pub autor_slug: Option<String>,
    pub validado: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWikiPayload {
    #[validate(length(min = 1, message = "O slug é obrigatório."))]
    pub slug: String,

    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub titulo: String,

    pub categoria: Option<String>,

    #[validate(length(min = 1, message = "O conteúdo é obrigatório."))]
    pub conteudo: String,

    pub resumo_ia: Option<String>,
    pub entidades: Option<Vec<String>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub materiais: Option<Value>,
    pub dificuldade: Option<i32>,
    pub tempo_execucao_horas: Option<i32>,
    pub autor_slug: Option<String>,

    #[serde(default)]
    pub validado: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateWikiPayload {
    pub titulo: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub categoria: Option<Option<String>>,
    pub conteudo: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub resumo_ia: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Vec<String>>)]
    pub entidades: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub materiais: Option<Option<Value>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub dificuldade: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub tempo_execucao_horas: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub autor_slug: Option<Option<String>>,
    pub validado: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WikiFilter {
    pub categoria: Option<String>,
}

impl WikiArticle {
    pub fn apply(&mut self, p: UpdateWikiPayload) {
        patch::set(&mut self.titulo, p.titulo);
        patch::set(&mut self.categoria, p.categoria);
        patch::set(&mut self.conteudo, p.conteudo);
        patch::set(&mut self.resumo_ia, p.resumo_ia);
        patch::set(&mut self.entidades, p.entidades);
        patch::set(&mut self.materiais, p.materiais);
        patch::set(&mut self.dificuldade, p.dificuldade);
        patch::set(&mut self.tempo_execucao_horas, p.tempo_execucao_horas);
        patch::set(&mut self.autor_slug, p.autor_slug);
        patch::set(&mut self.validado, p.validado);
    }
}
