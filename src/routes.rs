// src/routes.rs

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    let profile_routes = Router::new()
        .route("/"
               ,get(handlers::profiles::list_profiles)
               .post(handlers::profiles::create_profile)
        )
        .route("/{slug}"
               ,get(handlers::profiles::get_profile)
               .put(handlers::profiles::update_profile)
               .delete(handlers::profiles::delete_profile)
        );

    let space_routes = Router::new()
        .route("/"
               ,get(handlers::spaces::list_spaces)
               .post(handlers::spaces::create_space)
        )
        .route("/{slug}"
               ,get(handlers::spaces::get_space)
               .put(handlers::spaces::update_space)
               .delete(handlers::spaces::delete_space)
        );

    let item_routes = Router::new()
        .route("/"
               ,get(handlers::items::list_items)
               .post(handlers::items::create_item)
        )
        .route("/{codigo}"
               ,get(handlers::items::get_item)
               .put(handlers::items::update_item)
               .delete(handlers::items::delete_item)
        );

    let booking_routes = Router::new()
        .route("/"
               ,get(handlers::bookings::list_bookings)
               .post(handlers::bookings::create_booking)
        )
        .route("/{id}"
               ,get(handlers::bookings::get_booking)
               .put(handlers::bookings::update_booking)
               .delete(handlers::bookings::delete_booking)
        );

    let prestador_routes = Router::new()
        .route("/"
               ,get(handlers::prestadores::list_prestadores)
               .post(handlers::prestadores::create_prestador)
        )
        .route("/{id}"
               ,get(handlers::prestadores::get_prestador)
               .put(handlers::prestadores::update_prestador)
               .delete(handlers::prestadores::delete_prestador)
        );

    let chamado_routes = Router::new()
        .route("/"
               ,get(handlers::chamados::list_chamados)
               .post(handlers::chamados::create_chamado)
        )
        .route("/templates", get(handlers::chamados::list_templates))
        .route("/{id}"
               ,get(handlers::chamados::get_chamado)
               .put(handlers::chamados::update_chamado)
               .delete(handlers::chamados::delete_chamado)
        )
        .route("/{id}/whatsapp", get(handlers::chamados::get_whatsapp));

    let enquete_routes = Router::new()
        .route("/"
               ,get(handlers::enquetes::list_enquetes)
               .post(handlers::enquetes::create_enquete)
        )
        .route("/{id}"
               ,get(handlers::enquetes::get_enquete)
               .put(handlers::enquetes::update_enquete)
               .delete(handlers::enquetes::delete_enquete)
        )
        .route("/{id}/votar", post(handlers::enquetes::vote_enquete));

    let alert_routes = Router::new()
        .route("/"
               ,get(handlers::alerts::list_alerts)
               .post(handlers::alerts::create_alert)
        )
        .route("/{id}"
               ,get(handlers::alerts::get_alert)
               .put(handlers::alerts::update_alert)
               .delete(handlers::alerts::delete_alert)
        );

    let log_routes = Router::new()
        .route("/"
               ,get(handlers::logs::list_logs)
               .post(handlers::logs::create_log)
        )
        .route("/{id}", get(handlers::logs::get_log));

    let wiki_routes = Router::new()
        .route("/"
               ,get(handlers::wiki::list_articles)
               .post(handlers::wiki::create_article)
        )
        .route("/{slug}"
               ,get(handlers::wiki::get_article)
               .put(handlers::wiki::update_article)
               .delete(handlers::wiki::delete_article)
        );

    let sheet_routes = Router::new()
        .route("/", get(handlers::sheets::get_sheet))
        .route("/sync", post(handlers::sheets::sync_sheet));

    // Combina tudo no router principal
    Router::new()
        .route("/healthz", get(handlers::health::healthz))
        .route("/api/health", get(handlers::health::api_health))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/profiles", profile_routes)
        .nest("/api/spaces", space_routes)
        .nest("/api/items", item_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/prestadores", prestador_routes)
        .nest("/api/chamados", chamado_routes)
        .nest("/api/enquetes", enquete_routes)
        .nest("/api/alerts", alert_routes)
        .nest("/api/logs", log_routes)
        .nest("/api/wiki", wiki_routes)
        .nest("/api/sheets", sheet_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::services::sheet_service::tests::{StaticSheet, CSV};

    // Pool preguiçoso: as rotas testadas aqui nunca chegam ao banco.
    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/gestao_test")
            .unwrap();
        build_router(AppState::from_parts(pool, Arc::new(StaticSheet(CSV))))
    }

    async fn send(req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = app().oneshot(req).await.unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let (status, body) = send(get_req("/healthz")).await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn api_health_is_plain_text() {
        let (status, body) = send(get_req("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn templates_route_wins_over_id() {
        let (status, body) = send(get_req("/api/chamados/templates")).await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&str> = json["templates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, ["corretiva", "preventiva", "orcamento", "urgente"]);
    }

    #[tokio::test]
    async fn sheet_snapshot_uses_configured_source() {
        let (status, body) = send(get_req("/api/sheets")).await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 5);
        assert_eq!(json["rows"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = send(get_req("/api-docs/openapi.json")).await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(json["paths"]["/api/enquetes/{id}/votar"]["post"].is_object());
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_the_database() {
        let req = Request::post("/api/profiles")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"slug":"","nome_completo":"Ana"}"#))
            .unwrap();
        let (status, body) = send(req).await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["details"]["slug"].is_array());
    }

    #[tokio::test]
    async fn malformed_uuid_is_a_client_error() {
        let (status, _) = send(get_req("/api/bookings/nao-e-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn logs_do_not_accept_delete() {
        let req = Request::delete("/api/logs/00000000-0000-0000-0000-000000000000")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
