// src/models/booking.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::{self, nullable};

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pendente,
    Confirmada,
    EmAndamento,
    Concluida,
    Cancelada,
}

impl BookingStatus {
    /// Reservas nestes estados ocupam a agenda do espaço.
    pub const ACTIVE: [BookingStatus; 3] = [
        BookingStatus::Pendente,
        BookingStatus::Confirmada,
        BookingStatus::EmAndamento,
    ];

    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }
}

// --- Reserva de espaço e/ou empréstimo de itens ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub space_slug: Option<String>,
    pub item_codigos: Option<Vec<String>>,
    pub profile_slug: String,
    pub data_inicio: DateTime<Utc>,
    pub data_fim: DateTime<Utc>,
    pub tipo_uso: Option<String>,
    pub finalidade: Option<String>,
    pub numero_pessoas: Option<i32>,
    pub status: BookingStatus,
    pub checkin_itens: Option<DateTime<Utc>>,
    pub checkout_itens: Option<DateTime<Utc>>,
    pub checklist_entrada: Option<Value>,
    pub checklist_saida: Option<Value>,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBookingPayload {
    pub space_slug: Option<String>,
    pub item_codigos: Option<Vec<String>>,

    #[validate(length(min = 1, message = "O perfil responsável é obrigatório."))]
    pub profile_slug: String,

    pub data_inicio: DateTime<Utc>,
    pub data_fim: DateTime<Utc>,
    pub tipo_uso: Option<String>,
    pub finalidade: Option<String>,

    #[validate(range(min = 0, message = "O número de pessoas não pode ser negativo."))]
    pub numero_pessoas: Option<i32>,

    #[serde(default)]
    pub status: BookingStatus,

    pub observacoes: Option<String>,
}

// Atualizações NÃO passam pela checagem de conflito de agenda.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBookingPayload {
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub space_slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Vec<String>>)]
    pub item_codigos: Option<Option<Vec<String>>>,
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub tipo_uso: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub finalidade: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub numero_pessoas: Option<Option<i32>>,
    pub status: Option<BookingStatus>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub checkin_itens: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub checkout_itens: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Object>)]
    pub checklist_entrada: Option<Option<Value>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Object>)]
    pub checklist_saida: Option<Option<Value>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub observacoes: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub profile_slug: Option<String>,
    pub space_slug: Option<String>,
}

impl Booking {
    pub fn apply(&mut self, p: UpdateBookingPayload) {
        patch::set(&mut self.space_slug, p.space_slug);
        patch::set(&mut self.item_codigos, p.item_codigos);
        patch::set(&mut self.data_inicio, p.data_inicio);
        patch::set(&mut self.data_fim, p.data_fim);
        patch::set(&mut self.tipo_uso, p.tipo_uso);
        patch::set(&mut self.finalidade, p.finalidade);
        patch::set(&mut self.numero_pessoas, p.numero_pessoas);
        patch::set(&mut self.status, p.status);
        patch::set(&mut self.checkin_itens, p.checkin_itens);
        patch::set(&mut self.checkout_itens, p.checkout_itens);
        patch::set(&mut self.checklist_entrada, p.checklist_entrada);
        patch::set(&mut self.checklist_saida, p.checklist_saida);
        patch::set(&mut self.observacoes, p.observacoes);
    }

    /// Início estritamente antes do fim.
    pub fn has_valid_interval(&self) -> bool {
        self.data_inicio < self.data_fim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_pending_confirmed_and_in_progress_are_active() {
        assert!(BookingStatus::Pendente.is_active());
        assert!(BookingStatus::Confirmada.is_active());
        assert!(BookingStatus::EmAndamento.is_active());
        assert!(!BookingStatus::Concluida.is_active());
        assert!(!BookingStatus::Cancelada.is_active());
    }

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(BookingStatus::EmAndamento).unwrap(),
            json!("em_andamento")
        );
        let parsed: BookingStatus = serde_json::from_value(json!("cancelada")).unwrap();
        assert_eq!(parsed, BookingStatus::Cancelada);
    }

    #[test]
    fn checkout_update_keeps_schedule() {
        let inicio = "2024-03-05T10:00:00Z".parse().unwrap();
        let fim = "2024-03-05T12:00:00Z".parse().unwrap();
        let mut booking = Booking {
            id: Uuid::new_v4(),
            space_slug: Some("salao".into()),
            item_codigos: None,
            profile_slug: "ana".into(),
            data_inicio: inicio,
            data_fim: fim,
            tipo_uso: None,
            finalidade: Some("aniversário".into()),
            numero_pessoas: Some(30),
            status: BookingStatus::Confirmada,
            checkin_itens: None,
            checkout_itens: None,
            checklist_entrada: None,
            checklist_saida: None,
            observacoes: None,
            created_at: Utc::now(),
        };

        booking.apply(
            serde_json::from_value(json!({
                "status": "concluida",
                "checklist_saida": {"limpo": true}
            }))
            .unwrap(),
        );

        assert_eq!(booking.status, BookingStatus::Concluida);
        assert_eq!(booking.checklist_saida, Some(json!({"limpo": true})));
        assert_eq!(booking.data_inicio, inicio);
        assert_eq!(booking.data_fim, fim);
        assert_eq!(booking.numero_pessoas, Some(30));
    }

    #[test]
    fn moving_the_end_before_the_start_breaks_the_interval() {
        let mut booking: Booking = serde_json::from_value(json!({
            "id": Uuid::nil(),
            "space_slug": "salao",
            "item_codigos": null,
            "profile_slug": "ana",
            "data_inicio": "2024-03-05T10:00:00Z",
            "data_fim": "2024-03-05T12:00:00Z",
            "tipo_uso": null,
            "finalidade": null,
            "numero_pessoas": null,
            "status": "pendente",
            "checkin_itens": null,
            "checkout_itens": null,
            "checklist_entrada": null,
            "checklist_saida": null,
            "observacoes": null,
            "created_at": "2024-03-01T00:00:00Z"
        }))
        .unwrap();
        assert!(booking.has_valid_interval());

        booking.apply(serde_json::from_value(json!({"data_fim": "2024-03-05T10:00:00Z"})).unwrap());
        assert!(!booking.has_valid_interval());
    }
}
