// src/models/profile.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::{self, nullable};

// --- Perfil (morador / membro da comunidade) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    #[schema(example = "joao-silva")]
    pub slug: String,
    #[schema(example = "João da Silva")]
    pub nome_completo: String,
    pub nome_curto: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    #[schema(example = "morador")]
    pub role: Option<String>,
    pub lote: Option<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfilePayload {
    #[validate(length(min = 1, message = "O slug é obrigatório."))]
    pub slug: String,

    #[validate(length(min = 1, message = "O nome completo é obrigatório."))]
    pub nome_completo: String,

    pub nome_curto: Option<String>,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,

    pub telefone: Option<String>,
    pub role: Option<String>,
    pub lote: Option<String>,

    #[serde(default = "default_true")]
    pub ativo: bool,
}

// O slug é a identidade pública do perfil e não pode ser alterado.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfilePayload {
    pub nome_completo: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub nome_curto: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub telefone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub lote: Option<Option<String>>,
    pub ativo: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileFilter {
    pub ativo: Option<bool>,
    pub role: Option<String>,
}

impl Profile {
    pub fn apply(&mut self, p: UpdateProfilePayload) {
        patch::set(&mut self.nome_completo, p.nome_completo);
        patch::set(&mut self.nome_curto, p.nome_curto);
        patch::set(&mut self.email, p.email);
        patch::set(&mut self.telefone, p.telefone);
        patch::set(&mut self.role, p.role);
        patch::set(&mut self.lote, p.lote);
        patch::set(&mut self.ativo, p.ativo);
    }
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            slug: "ana".into(),
            nome_completo: "Ana Souza".into(),
            nome_curto: Some("Ana".into()),
            email: Some("ana@exemplo.com".into()),
            telefone: Some("(11) 90000-0000".into()),
            role: Some("morador".into()),
            lote: Some("12".into()),
            ativo: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn updating_one_field_leaves_the_rest_untouched() {
        let before = profile();
        let mut after = before.clone();
        let patch: UpdateProfilePayload = serde_json::from_str(r#"{"lote": "14"}"#).unwrap();

        after.apply(patch);

        assert_eq!(after.lote.as_deref(), Some("14"));
        assert_eq!(Profile { lote: before.lote.clone(), ..after }, before);
    }

    #[test]
    fn explicit_null_clears_a_nullable_field() {
        let mut p = profile();
        let patch: UpdateProfilePayload = serde_json::from_str(r#"{"email": null}"#).unwrap();

        p.apply(patch);

        assert_eq!(p.email, None);
        assert_eq!(p.nome_curto.as_deref(), Some("Ana"));
    }

    #[test]
    fn create_payload_defaults_to_active() {
        let payload: CreateProfilePayload =
            serde_json::from_str(r#"{"slug": "bia", "nome_completo": "Bia Lima"}"#).unwrap();
        assert!(payload.ativo);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_payload_rejects_bad_email() {
        let payload: CreateProfilePayload = serde_json::from_str(
            r#"{"slug": "bia", "nome_completo": "Bia Lima", "email": "nao-e-email"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
