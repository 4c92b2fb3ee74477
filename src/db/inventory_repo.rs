// src/db/inventory_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::inventory::InventoryLevel};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras
    // ---

    pub async fn list_levels(&self) -> Result<Vec<InventoryLevel>, AppError> {
        let levels = sqlx::query_as::<_, InventoryLevel>(
            "SELECT * FROM inventory_levels ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(levels)
    }

    pub async fn list_low_stock(&self) -> Result<Vec<InventoryLevel>, AppError> {
        let levels = sqlx::query_as::<_, InventoryLevel>(
            "SELECT * FROM inventory_levels WHERE quantity <= low_stock_threshold ORDER BY quantity ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(levels)
    }

    pub async fn get_level(&self, product_id: Uuid) -> Result<Option<InventoryLevel>, AppError> {
        let level = sqlx::query_as::<_, InventoryLevel>(
            "SELECT * FROM inventory_levels WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(level)
    }

    // Relê o saldo atual DENTRO da transação de venda. É a releitura
    // que decide se a batch inteira continua ou cai.
    pub async fn get_quantity<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Option<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let quantity: Option<i32> =
            sqlx::query_scalar("SELECT quantity FROM inventory_levels WHERE product_id = $1")
                .bind(product_id)
                .fetch_optional(executor)
                .await?;
        Ok(quantity)
    }

    // ---
    // Escritas (transacionais)
    // ---

    pub async fn create_level<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i32,
        low_stock_threshold: i32,
    ) -> Result<InventoryLevel, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let level = sqlx::query_as::<_, InventoryLevel>(
            r#"
            INSERT INTO inventory_levels (product_id, quantity, low_stock_threshold)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(low_stock_threshold)
        .fetch_one(executor)
        .await?;
        Ok(level)
    }

    /// Baixa de estoque da venda. A releitura (get_quantity) já garantiu
    /// saldo suficiente dentro da mesma transação; aqui é só o decremento.
    pub async fn decrement_quantity<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        amount: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE inventory_levels
            SET quantity = quantity - $2, updated_at = NOW()
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .bind(amount)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Ajuste manual (reposição ou correção). Delta positivo ou negativo;
    /// opcionalmente atualiza o alerta de estoque baixo.
    pub async fn adjust_quantity<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        delta: i32,
        low_stock_threshold: Option<i32>,
    ) -> Result<Option<InventoryLevel>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let level = sqlx::query_as::<_, InventoryLevel>(
            r#"
            UPDATE inventory_levels
            SET quantity = quantity + $2,
                low_stock_threshold = COALESCE($3, low_stock_threshold),
                updated_at = NOW()
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(delta)
        .bind(low_stock_threshold)
        .fetch_optional(executor)
        .await?;
        Ok(level)
    }
}
