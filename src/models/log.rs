// src/models/log.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// --- Registro de uso de item (somente inclusão) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Log {
    pub id: Uuid,
    pub item_codigo: Option<String>,
    #[schema(example = "retirada")]
    pub acao: String,
    pub profile_slug: Option<String>,
    pub booking_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub local_uso: Option<String>,
    pub condicao_saida: Option<String>,
    pub condicao_retorno: Option<String>,
    pub descricao_incidente: Option<String>,
    pub fotos_evidencia: Option<Vec<String>>,
    pub clima: Option<String>,
    pub sazonalidade: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLogPayload {
    pub item_codigo: Option<String>,

    #[validate(length(min = 1, message = "A ação é obrigatória."))]
    pub acao: String,

    pub profile_slug: Option<String>,
    pub booking_id: Option<String>,
    pub local_uso: Option<String>,
    pub condicao_saida: Option<String>,
    pub condicao_retorno: Option<String>,
    pub descricao_incidente: Option<String>,
    pub fotos_evidencia: Option<Vec<String>>,
    pub clima: Option<String>,
    pub sazonalidade: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogFilter {
    pub item_codigo: Option<String>,
    pub profile_slug: Option<String>,
    pub acao: Option<String>,
}
