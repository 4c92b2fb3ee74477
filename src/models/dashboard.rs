// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Resumo agregado para a tela inicial
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: i64,
    pub total_orders: i64,
    pub total_users: i64,

    #[schema(example = "1520.50")]
    pub revenue: Decimal,

    // Produtos no limite (quantity <= low_stock_threshold)
    pub low_stock_count: i64,
}
