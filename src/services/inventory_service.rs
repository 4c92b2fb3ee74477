// src/services/inventory_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{AdjustStockPayload, InventoryLevel},
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, pool: PgPool) -> Self {
        Self {
            inventory_repo,
            pool,
        }
    }

    pub async fn list_levels(&self) -> Result<Vec<InventoryLevel>, AppError> {
        self.inventory_repo.list_levels().await
    }

    // Produtos no limite do alerta
    pub async fn list_low_stock(&self) -> Result<Vec<InventoryLevel>, AppError> {
        self.inventory_repo.list_low_stock().await
    }

    /// Ajuste manual: reposição (delta positivo) ou correção (negativo).
    pub async fn adjust(&self, payload: AdjustStockPayload) -> Result<InventoryLevel, AppError> {
        let level = self
            .inventory_repo
            .adjust_quantity(
                &self.pool,
                payload.product_id,
                payload.quantity_change,
                payload.low_stock_threshold,
            )
            .await?
            .ok_or(AppError::ProductNotFound)?;

        if level.quantity <= level.low_stock_threshold {
            tracing::warn!(
                product_id = %level.product_id,
                quantity = level.quantity,
                "⚠️ Produto no limite de estoque baixo"
            );
        }

        Ok(level)
    }
}
