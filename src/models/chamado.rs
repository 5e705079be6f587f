// src/models/chamado.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::{self, nullable};

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "chamado_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChamadoStatus {
    #[default]
    Aberto,
    EmAndamento,
    Resolvido,
    Cancelado,
}

// --- Chamado de manutenção ---
// `prestador_nome`/`prestador_telefone` são uma cópia do prestador no momento
// da abertura; editar o prestador depois não altera chamados existentes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Chamado {
    pub id: Uuid,
    #[schema(example = 7)]
    pub numero: i32,
    #[schema(example = "Portão")]
    pub estrutura: String,
    pub area: Option<String>,
    #[schema(example = "Não abre")]
    pub descricao: String,
    #[schema(example = "alta")]
    pub prioridade: String,
    #[schema(example = "corretiva")]
    pub tipo: String,
    pub prestador_id: Option<Uuid>,
    pub prestador_nome: Option<String>,
    pub prestador_telefone: Option<String>,
    pub solicitante: Option<String>,
    pub mensagem_enviada: Option<String>,
    pub status: ChamadoStatus,
    pub resolucao: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateChamadoPayload {
    #[validate(length(min = 1, message = "A estrutura é obrigatória."))]
    pub estrutura: String,

    pub area: Option<String>,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub descricao: String,

    #[serde(default = "default_prioridade")]
    pub prioridade: String,

    #[serde(default = "default_tipo")]
    pub tipo: String,

    pub prestador_id: Option<Uuid>,
    pub solicitante: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateChamadoPayload {
    pub status: Option<ChamadoStatus>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub resolucao: Option<Option<String>>,
    pub prioridade: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChamadoFilter {
    pub status: Option<ChamadoStatus>,
    pub prioridade: Option<String>,
}

/// Resposta de `GET /api/chamados/{id}/whatsapp`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MensagemPreview {
    pub mensagem: String,
    #[schema(example = "https://wa.me/5511987654321?text=Ol%C3%A1")]
    pub whatsapp_url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemplateInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemplateCatalog {
    pub templates: Vec<TemplateInfo>,
}

impl Chamado {
    pub fn apply(&mut self, p: UpdateChamadoPayload) {
        patch::set(&mut self.status, p.status);
        patch::set(&mut self.resolucao, p.resolucao);
        patch::set(&mut self.prioridade, p.prioridade);
    }
}

fn default_prioridade() -> String {
    "normal".to_string()
}

fn default_tipo() -> String {
    "corretiva".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_payload_defaults() {
        let payload: CreateChamadoPayload = serde_json::from_value(json!({
            "estrutura": "Portão",
            "descricao": "Não abre"
        }))
        .unwrap();

        assert_eq!(payload.prioridade, "normal");
        assert_eq!(payload.tipo, "corretiva");
        assert!(payload.prestador_id.is_none());
    }

    #[test]
    fn resolving_keeps_snapshot_and_message() {
        let now = Utc::now();
        let mut chamado = Chamado {
            id: Uuid::new_v4(),
            numero: 3,
            estrutura: "Bomba d'água".into(),
            area: Some("Piscina".into()),
            descricao: "Barulho".into(),
            prioridade: "normal".into(),
            tipo: "corretiva".into(),
            prestador_id: Some(Uuid::new_v4()),
            prestador_nome: Some("Carlos".into()),
            prestador_telefone: Some("11999990000".into()),
            solicitante: None,
            mensagem_enviada: Some("Olá Carlos".into()),
            status: ChamadoStatus::Aberto,
            resolucao: None,
            created_at: now,
            updated_at: now,
        };
        let original = chamado.clone();

        chamado.apply(
            serde_json::from_value(json!({"status": "resolvido", "resolucao": "Rolamento trocado"}))
                .unwrap(),
        );

        assert_eq!(chamado.status, ChamadoStatus::Resolvido);
        assert_eq!(chamado.resolucao.as_deref(), Some("Rolamento trocado"));
        assert_eq!(chamado.numero, original.numero);
        assert_eq!(chamado.prestador_nome, original.prestador_nome);
        assert_eq!(chamado.mensagem_enviada, original.mensagem_enviada);
    }
}
