// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Saúde ---
        handlers::health::healthz,
        handlers::health::api_health,

        // --- Perfis ---
        handlers::profiles::list_profiles,
        handlers::profiles::get_profile,
        handlers::profiles::create_profile,
        handlers::profiles::update_profile,
        handlers::profiles::delete_profile,

        // --- Espaços ---
        handlers::spaces::list_spaces,
        handlers::spaces::get_space,
        handlers::spaces::create_space,
        handlers::spaces::update_space,
        handlers::spaces::delete_space,

        // --- Itens ---
        handlers::items::list_items,
        handlers::items::get_item,
        handlers::items::create_item,
        handlers::items::update_item,
        handlers::items::delete_item,

        // --- Reservas ---
        handlers::bookings::list_bookings,
        handlers::bookings::get_booking,
        handlers::bookings::create_booking,
        handlers::bookings::update_booking,
        handlers::bookings::delete_booking,

        // --- Prestadores ---
        handlers::prestadores::list_prestadores,
        handlers::prestadores::get_prestador,
        handlers::prestadores::create_prestador,
        handlers::prestadores::update_prestador,
        handlers::prestadores::delete_prestador,

        // --- Chamados ---
        handlers::chamados::list_chamados,
        handlers::chamados::get_chamado,
        handlers::chamados::create_chamado,
        handlers::chamados::update_chamado,
        handlers::chamados::delete_chamado,
        handlers::chamados::list_templates,
        handlers::chamados::get_whatsapp,

        // --- Enquetes ---
        handlers::enquetes::list_enquetes,
        handlers::enquetes::get_enquete,
        handlers::enquetes::create_enquete,
        handlers::enquetes::vote_enquete,
        handlers::enquetes::update_enquete,
        handlers::enquetes::delete_enquete,

        // --- Alertas ---
        handlers::alerts::list_alerts,
        handlers::alerts::get_alert,
        handlers::alerts::create_alert,
        handlers::alerts::update_alert,
        handlers::alerts::delete_alert,

        // --- Logs ---
        handlers::logs::list_logs,
        handlers::logs::get_log,
        handlers::logs::create_log,

        // --- Wiki ---
        handlers::wiki::list_articles,
        handlers::wiki::get_article,
        handlers::wiki::create_article,
        handlers::wiki::update_article,
        handlers::wiki::delete_article,

        // --- Planilha ---
        handlers::sheets::get_sheet,
        handlers::sheets::sync_sheet,
    ),
    components(
        schemas(
            handlers::health::HealthStatus,

            // --- Perfis / Espaços / Itens ---
            models::profile::Profile,
            models::profile::CreateProfilePayload,
            models::profile::UpdateProfilePayload,
            models::space::Space,
            models::space::CreateSpacePayload,
            models::space::UpdateSpacePayload,
            models::item::Item,
            models::item::CreateItemPayload,
            models::item::UpdateItemPayload,

            // --- Reservas ---
            models::booking::BookingStatus,
            models::booking::Booking,
            models::booking::CreateBookingPayload,
            models::booking::UpdateBookingPayload,

            // --- Manutenção ---
            models::prestador::Prestador,
            models::prestador::CreatePrestadorPayload,
            models::prestador::UpdatePrestadorPayload,
            models::chamado::ChamadoStatus,
            models::chamado::Chamado,
            models::chamado::CreateChamadoPayload,
            models::chamado::UpdateChamadoPayload,
            models::chamado::MensagemPreview,
            models::chamado::TemplateInfo,
            models::chamado::TemplateCatalog,

            // --- Enquetes ---
            models::enquete::EnqueteStatus,
            models::enquete::EnqueteResponse,
            models::enquete::CreateEnquetePayload,
            models::enquete::UpdateEnquetePayload,
            models::enquete::VotoPayload,

            // --- Alertas / Logs / Wiki ---
            models::alert::Alert,
            models::alert::CreateAlertPayload,
            models::alert::UpdateAlertPayload,
            models::log::Log,
            models::log::CreateLogPayload,
            models::wiki::WikiArticle,
            models::wiki::CreateWikiPayload,
            models::wiki::UpdateWikiPayload,

            // --- Planilha ---
            models::sheet::SheetRow,
            models::sheet::SheetData,
            models::sheet::SyncResult,
        )
    ),
    tags(
        (name = "Saúde", description = "Verificação de disponibilidade"),
        (name = "Perfis", description = "Moradores, voluntários e administradores"),
        (name = "Espaços", description = "Espaços físicos reserváveis"),
        (name = "Itens", description = "Inventário de itens da comunidade"),
        (name = "Reservas", description = "Reservas de espaços sem sobreposição"),
        (name = "Prestadores", description = "Prestadores de serviço de manutenção"),
        (name = "Chamados", description = "Chamados de manutenção e mensagens de WhatsApp"),
        (name = "Enquetes", description = "Enquetes e votação"),
        (name = "Alertas", description = "Notificações por perfil"),
        (name = "Logs", description = "Registro de uso de itens"),
        (name = "Wiki", description = "Artigos de instruções"),
        (name = "Planilha", description = "Planilha externa de compras e doações")
    ),
    modifiers(&InfoAddon)
)]
pub struct ApiDoc;

struct InfoAddon;

impl utoipa::Modify for InfoAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = "Gestão Comunitária API".to_string();
        openapi.info.description =
            Some("Espaços, itens, reservas, manutenção, enquetes e planilha da comunidade.".to_string());
    }
}
