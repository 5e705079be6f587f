// src/models/sheet.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Linha da planilha de compras/doações ---
// Colunas: área, status, responsável, item, descrição, quantidade, valor, total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SheetRow {
    #[schema(example = "Cozinha")]
    pub area: String,
    #[schema(example = "Compras")]
    pub status: String,
    pub responsavel: Option<String>,
    #[schema(example = "Panela")]
    pub item: String,
    pub descricao: Option<String>,
    pub quantidade: Option<i64>,
    #[schema(value_type = Option<f64>)]
    pub valor: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SheetData {
    pub rows: Vec<SheetRow>,
    #[schema(value_type = f64)]
    pub total_compras: Decimal,
    #[schema(value_type = f64)]
    pub total_arrecadacao: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SyncResult {
    pub created: u32,
    pub updated: u32,
    pub skipped: u32,
}
