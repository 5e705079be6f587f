// src/services/chamado_service.rs

use chrono::{DateTime, Utc};
use sqlx::{Acquire, Postgres};
use tracing::info;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ChamadoRepository, PrestadorRepository, chamado_repo::NewChamado},
    models::chamado::{Chamado, CreateChamadoPayload, MensagemPreview, TemplateCatalog, TemplateInfo},
};

// =============================================================================
//  TEMPLATES DE MENSAGEM
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Corretiva,
    Preventiva,
    Orcamento,
    Urgente,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Corretiva,
        TemplateKind::Preventiva,
        TemplateKind::Orcamento,
        TemplateKind::Urgente,
    ];

    /// `tipo` desconhecido cai no template de manutenção corretiva.
    pub fn from_tipo(tipo: &str) -> Self {
        match tipo {
            "preventiva" => TemplateKind::Preventiva,
            "orcamento" => TemplateKind::Orcamento,
            "urgente" => TemplateKind::Urgente,
            _ => TemplateKind::Corretiva,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            TemplateKind::Corretiva => "corretiva",
            TemplateKind::Preventiva => "preventiva",
            TemplateKind::Orcamento => "orcamento",
            TemplateKind::Urgente => "urgente",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemplateKind::Corretiva => "Manutenção Corretiva",
            TemplateKind::Preventiva => "Manutenção Preventiva",
            TemplateKind::Orcamento => "Orçamento",
            TemplateKind::Urgente => "Urgente",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateKind::Corretiva => "Algo quebrou ou não está funcionando",
            TemplateKind::Preventiva => "Manutenção programada/periódica",
            TemplateKind::Orcamento => "Solicitar orçamento para serviço",
            TemplateKind::Urgente => "Problema crítico que precisa de atenção imediata",
        }
    }
}

pub fn template_catalog() -> TemplateCatalog {
    TemplateCatalog {
        templates: TemplateKind::ALL
            .iter()
            .map(|t| TemplateInfo {
                key: t.key(),
                label: t.label(),
                description: t.description(),
            })
            .collect(),
    }
}

/// Campos substituídos no template.
#[derive(Debug, Clone, Copy)]
pub struct MessageFields<'a> {
    pub nome: &'a str,
    pub estrutura: &'a str,
    pub descricao: &'a str,
    pub prioridade: &'a str,
    pub numero: i32,
    pub data: DateTime<Utc>,
}

pub fn render_message(tipo: &str, f: &MessageFields<'_>) -> String {
    let MessageFields { nome, estrutura, descricao, prioridade, numero, .. } = *f;
    let data = f.data.format("%d/%m/%Y");

    match TemplateKind::from_tipo(tipo) {
        TemplateKind::Corretiva => format!(
            "Olá {nome}, aqui é da *Comunidade*.\n\
             Identificamos um problema: *{estrutura}*\n\
             Descrição: {descricao}\n\
             Prioridade: {prioridade}\n\
             Chamado #{numero:03} - {data}\n\
             Pode verificar o mais breve possível? Obrigado!"
        ),
        TemplateKind::Preventiva => format!(
            "Olá {nome}, aqui é da *Comunidade*.\n\
             Está na hora da manutenção preventiva: *{estrutura}*\n\
             Detalhes: {descricao}\n\
             Chamado #{numero:03} - {data}\n\
             Pode agendar uma visita? Obrigado!"
        ),
        TemplateKind::Orcamento => format!(
            "Olá {nome}, aqui é da *Comunidade*.\n\
             Precisamos de um orçamento para: *{estrutura}*\n\
             Detalhes: {descricao}\n\
             Chamado #{numero:03} - {data}\n\
             Pode nos enviar uma estimativa? Obrigado!"
        ),
        TemplateKind::Urgente => format!(
            "🚨 *URGENTE* - Olá {nome}, aqui é da *Comunidade*.\n\
             Problema crítico: *{estrutura}*\n\
             Descrição: {descricao}\n\
             Chamado #{numero:03} - {data}\n\
             Precisamos de atendimento IMEDIATO. Por favor, retorne o mais rápido possível!"
        ),
    }
}

// =============================================================================
//  WHATSAPP
// =============================================================================

/// Remove espaços, hífens, parênteses e `+`; prefixa o DDI 55 se faltar.
pub fn normalize_phone(telefone: &str) -> String {
    let digits: String = telefone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
        .collect();

    if digits.starts_with("55") {
        digits
    } else {
        format!("55{digits}")
    }
}

pub fn whatsapp_url(telefone: &str, mensagem: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(telefone),
        urlencoding::encode(mensagem)
    )
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct ChamadoService {
    repo: ChamadoRepository,
    prestador_repo: PrestadorRepository,
}

impl ChamadoService {
    pub fn new(repo: ChamadoRepository, prestador_repo: PrestadorRepository) -> Self {
        Self { repo, prestador_repo }
    }

    /// Abre um chamado: numeração, cópia do prestador e mensagem na mesma transação.
    pub async fn create<'a, A>(&self, conn: A, payload: &CreateChamadoPayload) -> Result<Chamado, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = conn.begin().await?;

        let numero = self.repo.next_numero(&mut *tx).await?;

        // Prestador inexistente não impede a abertura; o chamado só fica sem contato.
        let prestador = match payload.prestador_id {
            Some(id) => self.prestador_repo.find(&mut *tx, id).await?,
            None => None,
        };
        let prestador_nome = prestador.as_ref().map(|p| p.nome.as_str());
        let prestador_telefone = prestador.as_ref().map(|p| p.telefone.as_str());

        let created_at = Utc::now();
        let mensagem = match (prestador_nome, prestador_telefone) {
            (Some(nome), Some(telefone)) if !nome.is_empty() && !telefone.is_empty() => {
                Some(render_message(
                    &payload.tipo,
                    &MessageFields {
                        nome,
                        estrutura: &payload.estrutura,
                        descricao: &payload.descricao,
                        prioridade: &payload.prioridade,
                        numero,
                        data: created_at,
                    },
                ))
            }
            _ => None,
        };

        let chamado = self
            .repo
            .insert(
                &mut *tx,
                &NewChamado {
                    numero,
                    estrutura: &payload.estrutura,
                    area: payload.area.as_deref(),
                    descricao: &payload.descricao,
                    prioridade: &payload.prioridade,
                    tipo: &payload.tipo,
                    prestador_id: payload.prestador_id,
                    prestador_nome,
                    prestador_telefone,
                    solicitante: payload.solicitante.as_deref(),
                    mensagem_enviada: mensagem.as_deref(),
                    created_at,
                },
            )
            .await?;

        tx.commit().await?;

        info!("📋 Chamado #{:03} aberto: {}", chamado.numero, chamado.estrutura);
        Ok(chamado)
    }

    /// Mensagem + link do WhatsApp. Nunca grava nada.
    pub async fn whatsapp<'a, A>(&self, conn: A, id: Uuid) -> Result<MensagemPreview, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut conn = conn.acquire().await?;
        let chamado = self.repo.get(&mut *conn, id).await?;
        preview(&chamado)
    }
}

/// Mensagem armazenada, ou renderizada na hora a partir dos campos atuais.
pub fn preview(chamado: &Chamado) -> Result<MensagemPreview, AppError> {
    let telefone = chamado
        .prestador_telefone
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::InvalidState("Chamado sem prestador/telefone vinculado".to_string())
        })?;

    let mensagem = match chamado.mensagem_enviada.as_deref() {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => render_message(
            &chamado.tipo,
            &MessageFields {
                nome: chamado
                    .prestador_nome
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .unwrap_or("Responsável"),
                estrutura: &chamado.estrutura,
                descricao: &chamado.descricao,
                prioridade: &chamado.prioridade,
                numero: chamado.numero,
                data: chamado.created_at,
            },
        ),
    };

    Ok(MensagemPreview {
        whatsapp_url: whatsapp_url(telefone, &mensagem),
        mensagem,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chamado::ChamadoStatus;
    use crate::models::prestador::CreatePrestadorPayload;
    use sqlx::PgPool;

    fn fields(data: &str) -> MessageFields<'static> {
        MessageFields {
            nome: "João",
            estrutura: "Portão",
            descricao: "Não abre",
            prioridade: "alta",
            numero: 7,
            data: format!("{data}T15:00:00Z").parse().unwrap(),
        }
    }

    #[test]
    fn urgent_template_is_filled_verbatim() {
        let msg = render_message("urgente", &fields("2024-03-05"));
        assert_eq!(
            msg,
            "🚨 *URGENTE* - Olá João, aqui é da *Comunidade*.\n\
             Problema crítico: *Portão*\n\
             Descrição: Não abre\n\
             Chamado #007 - 05/03/2024\n\
             Precisamos de atendimento IMEDIATO. Por favor, retorne o mais rápido possível!"
        );
    }

    #[test]
    fn unknown_tipo_falls_back_to_corrective() {
        let f = fields("2024-03-05");
        assert_eq!(render_message("xyz", &f), render_message("corretiva", &f));
        assert!(render_message("xyz", &f).contains("Prioridade: alta"));
    }

    #[test]
    fn only_corrective_prints_priority() {
        let f = fields("2024-03-05");
        for kind in [TemplateKind::Preventiva, TemplateKind::Orcamento, TemplateKind::Urgente] {
            assert!(!render_message(kind.key(), &f).contains("Prioridade"));
        }
    }

    #[test]
    fn number_is_zero_padded_to_three_digits() {
        let mut f = fields("2024-12-31");
        f.numero = 1234;
        assert!(render_message("preventiva", &f).contains("Chamado #1234 - 31/12/2024"));
    }

    #[test]
    fn phone_normalization() {
        assert_eq!(normalize_phone("(11) 98765-4321"), "5511987654321");
        assert_eq!(normalize_phone("+55 11 98765-4321"), "5511987654321");
        assert_eq!(normalize_phone("5511987654321"), "5511987654321");
    }

    #[test]
    fn whatsapp_link_encodes_the_message() {
        let url = whatsapp_url("(11) 98765-4321", "Olá João\nPortão");
        assert_eq!(url, "https://wa.me/5511987654321?text=Ol%C3%A1%20Jo%C3%A3o%0APort%C3%A3o");
    }

    #[test]
    fn catalog_lists_the_four_templates() {
        let keys: Vec<_> = template_catalog().templates.iter().map(|t| t.key).collect();
        assert_eq!(keys, ["corretiva", "preventiva", "orcamento", "urgente"]);
    }

    fn chamado() -> Chamado {
        let created = "2024-03-05T12:00:00Z".parse().unwrap();
        Chamado {
            id: Uuid::new_v4(),
            numero: 12,
            estrutura: "Bomba".into(),
            area: None,
            descricao: "Vazando".into(),
            prioridade: "normal".into(),
            tipo: "orcamento".into(),
            prestador_id: None,
            prestador_nome: None,
            prestador_telefone: Some("11 4000-1234".into()),
            solicitante: None,
            mensagem_enviada: None,
            status: ChamadoStatus::Aberto,
            resolucao: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn preview_renders_with_fallback_name() {
        let p = preview(&chamado()).unwrap();
        assert!(p.mensagem.starts_with("Olá Responsável, aqui é da *Comunidade*."));
        assert!(p.mensagem.contains("Chamado #012 - 05/03/2024"));
        assert!(p.whatsapp_url.starts_with("https://wa.me/551140001234?text="));
    }

    #[test]
    fn preview_prefers_stored_message() {
        let mut c = chamado();
        c.mensagem_enviada = Some("mensagem original".into());
        assert_eq!(preview(&c).unwrap().mensagem, "mensagem original");
    }

    #[test]
    fn preview_without_phone_is_invalid_state() {
        let mut c = chamado();
        c.prestador_telefone = None;
        assert!(matches!(preview(&c), Err(AppError::InvalidState(_))));
    }

    fn service() -> ChamadoService {
        ChamadoService::new(ChamadoRepository::new(), PrestadorRepository::new())
    }

    fn payload(prestador_id: Option<Uuid>) -> CreateChamadoPayload {
        CreateChamadoPayload {
            estrutura: "Portão".into(),
            area: Some("Entrada".into()),
            descricao: "Não abre".into(),
            prioridade: "alta".into(),
            tipo: "urgente".into(),
            prestador_id,
            solicitante: Some("ana".into()),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn numbers_are_sequential_and_never_reused(pool: PgPool) {
        let service = service();
        let a = service.create(&pool, &payload(None)).await.unwrap();
        let b = service.create(&pool, &payload(None)).await.unwrap();
        assert_eq!((a.numero, b.numero), (1, 2));

        ChamadoRepository::new().delete(&pool, b.id).await.unwrap();
        let c = service.create(&pool, &payload(None)).await.unwrap();
        assert_eq!(c.numero, 3);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn concurrent_creation_never_duplicates_numbers(pool: PgPool) {
        let service = service();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let (service, pool) = (service.clone(), pool.clone());
                tokio::spawn(async move { service.create(&pool, &payload(None)).await })
            })
            .collect();

        let mut numeros = Vec::new();
        for h in handles {
            numeros.push(h.await.unwrap().unwrap().numero);
        }
        numeros.sort();
        assert_eq!(numeros, (1..=8).collect::<Vec<_>>());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn provider_snapshot_and_message(pool: PgPool) {
        let prestadores = PrestadorRepository::new();
        let joao = prestadores
            .create(
                &pool,
                &CreatePrestadorPayload {
                    nome: "João".into(),
                    telefone: "(11) 98765-4321".into(),
                    especialidade: Some("serralheiro".into()),
                    empresa: None,
                    notas: None,
                    ativo: true,
                },
            )
            .await
            .unwrap();

        let chamado = service().create(&pool, &payload(Some(joao.id))).await.unwrap();
        assert_eq!(chamado.prestador_nome.as_deref(), Some("João"));
        let mensagem = chamado.mensagem_enviada.clone().unwrap();
        assert!(mensagem.starts_with("🚨 *URGENTE* - Olá João"));

        // Editar o prestador depois não muda o chamado.
        prestadores
            .update(&pool, joao.id, serde_json::from_str(r#"{"nome": "João Silva"}"#).unwrap())
            .await
            .unwrap();
        let preview = service().whatsapp(&pool, chamado.id).await.unwrap();
        assert_eq!(preview.mensagem, mensagem);
    }
}
