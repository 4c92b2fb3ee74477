// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Inactive,
}

// --- Produto (Catálogo) ---
// Produtos de lojista carregam owner_id; produtos "da casa" ficam sem dono.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,

    #[schema(example = "Café Torrado 500g")]
    pub name: String,

    #[schema(example = "CAFE-500")]
    pub sku: String,

    #[schema(example = "bebidas")]
    pub category: String,

    #[schema(example = "24.90")]
    pub price: Decimal,

    pub status: ProductStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payload: CreateProduct ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,

    #[validate(length(min = 1, message = "SKU is required."))]
    pub sku: String,

    #[serde(default = "default_category")]
    pub category: String,

    pub price: Decimal,

    // Estoque inicial opcional: cria o saldo junto com o produto
    #[serde(default)]
    pub initial_stock: i32,

    #[serde(default)]
    pub low_stock_threshold: i32,
}

fn default_category() -> String {
    "general".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub status: Option<ProductStatus>,
}
