// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AlertRepository, BookingRepository, ChamadoRepository, EnqueteRepository, ItemRepository,
        LogRepository, PrestadorRepository, ProfileRepository, SpaceRepository, WikiRepository,
    },
    services::{
        BookingService, ChamadoService, EnqueteService, SheetService,
        sheet_service::{HttpSheetSource, SheetSource},
    },
};

pub const DEFAULT_SHEET_CSV_URL: &str =
    "https://docs.google.com/spreadsheets/d/16fCr0rhUfZKw8THvfoVxlMcn95XKxs2N/export?format=csv";

// --- Configuração lida do ambiente (.env) ---
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub sheet_csv_url: String,
    pub sheet_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let db_max_connections = parse_var("DB_MAX_CONNECTIONS", 5)?;
        let sheet_csv_url =
            env::var("SHEET_CSV_URL").unwrap_or_else(|_| DEFAULT_SHEET_CSV_URL.to_string());
        let sheet_timeout = Duration::from_secs(parse_var("SHEET_TIMEOUT_SECS", 30)?);

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            sheet_csv_url,
            sheet_timeout,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} inválida: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    // Repositórios (CRUD direto)
    pub profile_repo: ProfileRepository,
    pub space_repo: SpaceRepository,
    pub item_repo: ItemRepository,
    pub booking_repo: BookingRepository,
    pub prestador_repo: PrestadorRepository,
    pub chamado_repo: ChamadoRepository,
    pub enquete_repo: EnqueteRepository,
    pub alert_repo: AlertRepository,
    pub log_repo: LogRepository,
    pub wiki_repo: WikiRepository,

    // Serviços (regras de negócio)
    pub booking_service: BookingService,
    pub chamado_service: ChamadoService,
    pub enquete_service: EnqueteService,
    pub sheet_service: SheetService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let sheet_source = HttpSheetSource::new(&config.sheet_csv_url, config.sheet_timeout)?;
        Ok(Self::from_parts(db_pool, Arc::new(sheet_source)))
    }

    /// Monta o gráfico de dependências a partir de um pool e de uma fonte de planilha.
    pub fn from_parts(db_pool: PgPool, sheet_source: Arc<dyn SheetSource>) -> Self {
        let item_repo = ItemRepository::new();
        let booking_repo = BookingRepository::new();
        let prestador_repo = PrestadorRepository::new();
        let chamado_repo = ChamadoRepository::new();
        let enquete_repo = EnqueteRepository::new();

        Self {
            db_pool,
            profile_repo: ProfileRepository::new(),
            space_repo: SpaceRepository::new(),
            item_repo: item_repo.clone(),
            booking_repo: booking_repo.clone(),
            prestador_repo: prestador_repo.clone(),
            chamado_repo: chamado_repo.clone(),
            enquete_repo: enquete_repo.clone(),
            alert_repo: AlertRepository::new(),
            log_repo: LogRepository::new(),
            wiki_repo: WikiRepository::new(),
            booking_service: BookingService::new(booking_repo),
            chamado_service: ChamadoService::new(chamado_repo, prestador_repo),
            enquete_service: EnqueteService::new(enquete_repo),
            sheet_service: SheetService::new(sheet_source, item_repo),
        }
    }
}
