use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Taxonomia de erros da API. Cada variante vira um status HTTP distinto.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    AlreadyVoted(String),

    #[error("{0}")]
    UpstreamUnavailable(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &str, key: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("{entity} '{key}' não encontrado(a)"))
    }

    /// Converte violação de chave única em `Conflict`; o resto segue como erro de banco.
    pub fn from_unique_violation(e: sqlx::Error, message: impl FnOnce() -> String) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::Conflict(message());
            }
        }
        e.into()
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            // Pedido bem formado, mas o estado atual do recurso não permite.
            AppError::InvalidState(_) | AppError::AlreadyVoted(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InvalidInput(msg)
            | AppError::InvalidState(msg)
            | AppError::AlreadyVoted(msg)
            | AppError::UpstreamUnavailable(msg) => msg,

            // Erros internos: o detalhe vai para o log, nunca para o cliente.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_maps_to_its_own_status() {
        assert_eq!(AppError::not_found("Item", "x").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("c".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidInput("i".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidState("s".into()).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(AppError::AlreadyVoted("v".into()).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            AppError::UpstreamUnavailable("u".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_key() {
        let err = AppError::not_found("Espaço", "salao");
        assert_eq!(err.to_string(), "Espaço 'salao' não encontrado(a)");
    }

    #[test]
    fn non_database_error_is_not_turned_into_conflict() {
        let err = AppError::from_unique_violation(sqlx::Error::RowNotFound, || "dup".into());
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn internal_errors_hide_details_from_the_client() {
        let response = AppError::InternalServerError(anyhow::anyhow!("senha do banco")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Ocorreu um erro inesperado.");
    }
}
