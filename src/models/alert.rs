// src/models/alert.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::{self, nullable};

// --- Notificação para um perfil ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Alert {
    pub id: Uuid,
    #[schema(example = "manutencao")]
    pub tipo: Option<String>,
    pub profile_slug: Option<String>,
    pub titulo: String,
    pub mensagem: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub dados_json: Option<Value>,
    pub lido: bool,
    pub data_acao: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAlertPayload {
    pub tipo: Option<String>,
    pub profile_slug: Option<String>,

    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub titulo: String,

    pub mensagem: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub dados_json: Option<Value>,
    pub data_acao: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAlertPayload {
    pub lido: Option<bool>,
    pub titulo: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub mensagem: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlertFilter {
    pub profile_slug: Option<String>,
    pub lido: Option<bool>,
    pub tipo: Option<String>,
}

impl Alert {
    pub fn apply(&mut self, p: UpdateAlertPayload) {
        patch::set(&mut self.lido, p.lido);
        patch::set(&mut self.titulo, p.titulo);
        patch::set(&mut self.mensagem, p.mensagem);
    }
}
