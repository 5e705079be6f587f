// src/services/sheet_service.rs

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::{Acquire, Postgres};
use tracing::{info, warn};

use crate::{
    common::error::AppError,
    db::ItemRepository,
    models::{
        item::CreateItemPayload,
        sheet::{SheetData, SheetRow, SyncResult},
    },
};

// =============================================================================
//  FONTE DA PLANILHA
// =============================================================================

#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Conteúdo CSV bruto da planilha.
    async fn fetch_csv(&self) -> Result<String, AppError>;
}

/// Exportação CSV do Google Sheets via HTTP.
pub struct HttpSheetSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSheetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Falha ao criar o cliente HTTP: {e}"))?;

        Ok(Self { client, url: url.into() })
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch_csv(&self) -> Result<String, AppError> {
        let upstream = |e: reqwest::Error| {
            warn!("Falha ao buscar a planilha: {}", e);
            AppError::UpstreamUnavailable(format!("Falha ao buscar a planilha: {e}"))
        };

        self.client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(upstream)?
            .text()
            .await
            .map_err(upstream)
    }
}

// =============================================================================
//  PARSING
// =============================================================================

/// Número com vírgula ou ponto decimal; vazio ou lixo vira `None`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim().replace(',', ".");
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

/// Quantidade: aceita "3" ou "3.0", truncando para inteiro.
pub fn parse_quantidade(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .and_then(|d| d.trunc().to_i64())
}

fn col(record: &csv::StringRecord, i: usize) -> &str {
    record.get(i).map(str::trim).unwrap_or("")
}

fn opt_col(record: &csv::StringRecord, i: usize) -> Option<String> {
    Some(col(record, i)).filter(|s| !s.is_empty()).map(String::from)
}

/// Lê o CSV (primeira linha é cabeçalho) e descarta linhas que não são dados:
/// menos de 4 colunas, área ou item vazios, área começando com `,` ou item
/// começando com "total".
pub fn parse_sheet_csv(text: &str) -> Result<Vec<SheetRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| AppError::UpstreamUnavailable(format!("CSV da planilha inválido: {e}")))?;

        if record.len() < 4 {
            continue;
        }
        let area = col(&record, 0);
        let item = col(&record, 3);
        if area.is_empty() || item.is_empty() {
            continue;
        }
        if area.starts_with(',') || item.to_lowercase().starts_with("total") {
            continue;
        }

        rows.push(SheetRow {
            area: area.to_string(),
            status: col(&record, 1).to_string(),
            responsavel: opt_col(&record, 2),
            item: item.to_string(),
            descricao: opt_col(&record, 4),
            quantidade: parse_quantidade(col(&record, 5)),
            valor: parse_decimal(col(&record, 6)),
            total: parse_decimal(col(&record, 7)),
        });
    }

    Ok(rows)
}

pub fn summarize(rows: Vec<SheetRow>) -> SheetData {
    let soma = |status: &[&str]| -> Decimal {
        rows.iter()
            .filter(|r| status.iter().any(|s| *s == r.status))
            .filter_map(|r| r.total)
            .sum()
    };
    let total_compras = soma(&["Compras"]);
    let total_arrecadacao = soma(&["Doação", "Caixinha"]);

    SheetData {
        count: rows.len(),
        rows,
        total_compras,
        total_arrecadacao,
    }
}

// =============================================================================
//  SINCRONIZAÇÃO COM O INVENTÁRIO
// =============================================================================

pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_sep = false;

    for c in lowered.chars() {
        let c = match c {
            'ã' | 'á' | 'â' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        };
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    slug
}

fn estado_from_status(status: &str) -> &'static str {
    match status {
        "Investir" => "novo",
        _ => "bom",
    }
}

fn categoria_from_area(area: &str, area_slug: &str) -> String {
    match area {
        "Cozinha" => "cozinha",
        "Banheiro" => "banheiro",
        "Limpeza" => "limpeza",
        "Lazer" => "lazer",
        "SOS" => "sos",
        _ => area_slug,
    }
    .to_string()
}

/// Item derivado de uma linha da planilha, pronto para upsert por `codigo`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedItem {
    pub codigo: String,
    pub nome: String,
    pub descricao: Option<String>,
    pub categoria: String,
    pub estado: String,
    pub tags: Vec<String>,
}

/// Gera os códigos do lote: a N-ésima repetição de um código recebe `_NN`.
/// Linhas cuja área ou item não geram slug são puladas.
pub fn plan_sync(rows: &[SheetRow]) -> (Vec<PlannedItem>, u32) {
    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut planned = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        let area_slug = slugify(&row.area);
        let item_slug = slugify(&row.item);
        if area_slug.is_empty() || item_slug.is_empty() {
            skipped += 1;
            continue;
        }

        let base = format!("{area_slug}.{item_slug}");
        let count = seen.entry(base.clone()).or_insert(0);
        *count += 1;
        let codigo = if *count == 1 { base } else { format!("{base}_{:02}", *count) };

        let mut partes = Vec::new();
        if let Some(d) = &row.descricao {
            partes.push(d.clone());
        }
        if let Some(r) = &row.responsavel {
            partes.push(format!("Responsável: {r}"));
        }
        if !row.status.is_empty() {
            partes.push(format!("Status planilha: {}", row.status));
        }
        if let Some(v) = row.valor.filter(|v| !v.is_zero()) {
            partes.push(format!("Valor: R${:.2}", v.round_dp(2)));
        }

        let mut tags = Vec::new();
        if !row.status.is_empty() {
            tags.push(row.status.to_lowercase());
        }
        if let Some(r) = &row.responsavel {
            tags.push(r.to_lowercase());
        }

        planned.push(PlannedItem {
            codigo,
            nome: row.item.clone(),
            descricao: (!partes.is_empty()).then(|| partes.join(" | ")),
            categoria: categoria_from_area(&row.area, &area_slug),
            estado: estado_from_status(&row.status).to_string(),
            tags,
        });
    }

    (planned, skipped)
}

#[derive(Clone)]
pub struct SheetService {
    source: Arc<dyn SheetSource>,
    item_repo: ItemRepository,
}

impl SheetService {
    pub fn new(source: Arc<dyn SheetSource>, item_repo: ItemRepository) -> Self {
        Self { source, item_repo }
    }

    pub async fn fetch_rows(&self) -> Result<Vec<SheetRow>, AppError> {
        let csv = self.source.fetch_csv().await?;
        parse_sheet_csv(&csv)
    }

    pub async fn snapshot(&self) -> Result<SheetData, AppError> {
        Ok(summarize(self.fetch_rows().await?))
    }

    /// Upsert dos itens da planilha no inventário, tudo numa transação.
    pub async fn sync<'a, A>(&self, conn: A) -> Result<SyncResult, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let rows = self.fetch_rows().await?;
        let (planned, skipped) = plan_sync(&rows);
        let mut result = SyncResult { skipped, ..SyncResult::default() };

        let mut tx = conn.begin().await?;

        for p in planned {
            match self.item_repo.find(&mut *tx, &p.codigo).await? {
                Some(mut existing) => {
                    existing.nome = p.nome;
                    existing.descricao = p.descricao;
                    existing.categoria = Some(p.categoria);
                    existing.estado = p.estado;
                    existing.tags = Some(p.tags);
                    self.item_repo.save(&mut *tx, &existing).await?;
                    result.updated += 1;
                }
                None => {
                    let payload = CreateItemPayload {
                        codigo: p.codigo,
                        nome: p.nome,
                        descricao: p.descricao,
                        space_slug: None,
                        container_especifico: None,
                        categoria: Some(p.categoria),
                        estado: p.estado,
                        manual_cuidados: None,
                        ciclo_manutencao: None,
                        ultima_manutencao: None,
                        proxima_manutencao: None,
                        tags: Some(p.tags),
                        fotos: None,
                        qr_code_url: None,
                    };
                    self.item_repo.create(&mut *tx, &payload).await?;
                    result.created += 1;
                }
            }
        }

        tx.commit().await?;

        info!(
            "📥 Planilha sincronizada: {} criados, {} atualizados, {} ignorados",
            result.created, result.updated, result.skipped
        );
        Ok(result)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sqlx::PgPool;

    /// Fonte fixa para testes.
    pub(crate) struct StaticSheet(pub &'static str);

    #[async_trait]
    impl SheetSource for StaticSheet {
        async fn fetch_csv(&self) -> Result<String, AppError> {
            Ok(self.0.to_string())
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    pub(crate) const CSV: &str = "\
Área,Status,Responsável,Item,Descrição,Qtd,Valor,Total
Cozinha,Compras,Ana,Panela,Inox,2,\"45,50\",\"91,00\"
Cozinha,Doação,Bia,Panela,,1,,
Banheiro,Caixinha,,Sabonete,,10,2.5,25
Lazer,Investir,Caio,Rede,Para a varanda,1.0,120,120
,Compras,,Vassoura,,1,10,10
\",lixo\",,,Qualquer,,,,
Cozinha,Compras,,TOTAL GERAL,,,,91
Só três,colunas,x
Limpeza,Compras,Ana,Rodo,,abc,xyz,15
";

    #[test]
    fn parses_rows_and_skips_non_data_lines() {
        let rows = parse_sheet_csv(CSV).unwrap();
        let itens: Vec<_> = rows.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(itens, ["Panela", "Panela", "Sabonete", "Rede", "Rodo"]);

        assert_eq!(rows[0].valor, Some(dec("45.50")));
        assert_eq!(rows[0].quantidade, Some(2));
        assert_eq!(rows[1].responsavel.as_deref(), Some("Bia"));
        assert_eq!(rows[1].descricao, None);
        assert_eq!(rows[3].quantidade, Some(1));
        assert_eq!(rows[4].quantidade, None);
        assert_eq!(rows[4].valor, None);
        assert_eq!(rows[4].total, Some(dec("15")));
    }

    #[test]
    fn totals_by_status() {
        let data = summarize(parse_sheet_csv(CSV).unwrap());
        assert_eq!(data.count, 5);
        assert_eq!(data.total_compras, dec("106"));
        assert_eq!(data.total_arrecadacao, dec("25"));
    }

    #[test]
    fn slugify_strips_accents_and_symbols() {
        assert_eq!(slugify("  Cozinha "), "cozinha");
        assert_eq!(slugify("Pão de Açúcar!"), "pao_de_acucar");
        assert_eq!(slugify("Área -- Externa"), "area_externa");
        assert_eq!(slugify("__Ação__"), "acao");
        assert_eq!(slugify("!!!"), "");
        // `õ` e `à` ficam fora da tabela: viram separador, como nos códigos já gravados.
        assert_eq!(slugify("Limões"), "lim_es");
        assert_eq!(slugify("Àgua"), "gua");
    }

    #[test]
    fn repeated_codes_get_numeric_suffix() {
        let rows = parse_sheet_csv(CSV).unwrap();
        let (planned, skipped) = plan_sync(&rows);
        let codigos: Vec<_> = planned.iter().map(|p| p.codigo.as_str()).collect();

        assert_eq!(skipped, 0);
        assert_eq!(
            codigos,
            ["cozinha.panela", "cozinha.panela_02", "banheiro.sabonete", "lazer.rede", "limpeza.rodo"]
        );
    }

    #[test]
    fn derived_fields() {
        let rows = parse_sheet_csv(CSV).unwrap();
        let (planned, _) = plan_sync(&rows);

        let panela = &planned[0];
        assert_eq!(panela.estado, "bom");
        assert_eq!(panela.categoria, "cozinha");
        assert_eq!(
            panela.descricao.as_deref(),
            Some("Inox | Responsável: Ana | Status planilha: Compras | Valor: R$45.50")
        );
        assert_eq!(panela.tags, ["compras", "ana"]);

        let rede = &planned[3];
        assert_eq!(rede.estado, "novo");
        assert_eq!(rede.descricao.as_deref().map(|d| d.ends_with("Valor: R$120.00")), Some(true));
    }

    #[test]
    fn rows_without_slug_are_skipped() {
        let rows = vec![SheetRow {
            area: "???".into(),
            status: "Compras".into(),
            responsavel: None,
            item: "Panela".into(),
            descricao: None,
            quantidade: None,
            valor: None,
            total: None,
        }];
        let (planned, skipped) = plan_sync(&rows);
        assert!(planned.is_empty());
        assert_eq!(skipped, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requer Postgres (DATABASE_URL)"]
    async fn rerunning_sync_updates_instead_of_duplicating(pool: PgPool) {
        let service = SheetService::new(Arc::new(StaticSheet(CSV)), ItemRepository::new());

        let first = service.sync(&pool).await.unwrap();
        assert_eq!(first, SyncResult { created: 5, updated: 0, skipped: 0 });

        let second = service.sync(&pool).await.unwrap();
        assert_eq!(second, SyncResult { created: 0, updated: 5, skipped: 0 });

        let panela = ItemRepository::new().get(&pool, "cozinha.panela_02").await.unwrap();
        assert_eq!(panela.nome, "Panela");
        assert_eq!(panela.vezes_usado, 0);
    }
}
