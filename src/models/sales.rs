// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Completed,
    Cancelled,
}

// --- Pedido (agregado do checkout) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "30.00")]
    pub total_amount: Decimal,

    pub status: OrderStatus,

    // Referência da sessão externa de pagamento, quando houver
    pub payment_session_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Venda (um item de linha dentro de um pedido) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,

    #[schema(example = "30.00")]
    pub total_amount: Decimal,

    pub created_at: DateTime<Utc>,
}

// --- Itens do carrinho ---
// O payload aceita linhas incompletas de propósito: linhas inválidas são
// descartadas na sanitização em vez de derrubar a requisição inteira.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPayload {
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
}

// Uma linha de carrinho já saneada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    #[schema(example = json!([{"productId": "550e8400-e29b-41d4-a716-446655440007", "quantity": 3, "price": 10.0}]))]
    pub items: Vec<CartItemPayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentPayload {
    #[schema(example = "cs_test_a1b2c3")]
    pub session_id: String,
}

// Resposta dos dois fluxos de checkout
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    #[schema(example = "Order placed successfully")]
    pub message: String,
    pub order_id: Uuid,
    pub sales: Vec<Sale>,
}

// Resposta da fase 1 do fluxo com gateway
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    #[schema(example = "cs_test_a1b2c3")]
    pub id: String,
    #[schema(example = "https://gateway.example/pay/cs_test_a1b2c3")]
    pub url: String,
}

// Pedido + suas vendas (consulta de detalhe)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithSales {
    #[serde(flatten)]
    pub order: Order,
    pub sales: Vec<Sale>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    pub status: OrderStatus,
}
