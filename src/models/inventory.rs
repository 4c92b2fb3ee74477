// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Saldo de Estoque ---
// Uma linha por produto. A quantidade é mutada pelas vendas e pelo
// ajuste manual; nunca deveria ficar negativa (a checagem vive na
// transação de venda, não no banco).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub low_stock_threshold: i32,
    pub updated_at: DateTime<Utc>,
}

// --- Payload: Ajuste manual (reposição / correção) ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockPayload {
    pub product_id: Uuid,

    // Positivo = entrada, negativo = correção para baixo
    #[schema(example = 50)]
    pub quantity_change: i32,

    // Se vier, também atualiza o alerta de estoque baixo
    pub low_stock_threshold: Option<i32>,
}
