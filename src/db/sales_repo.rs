// src/db/sales_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::{Order, OrderStatus, Sale},
};

#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Escritas (sempre dentro da transação do checkout)
    // ---

    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        total_amount: Decimal,
        payment_session_id: Option<&str>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, total_amount, status, payment_session_id)
            VALUES ($1, $2, 'COMPLETED', $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(total_amount)
        .bind(payment_session_id)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        total_amount: Decimal,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (order_id, product_id, quantity, total_amount)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(total_amount)
        .fetch_one(executor)
        .await?;
        Ok(sale)
    }

    // ---
    // Leituras (relatórios)
    // ---

    // Admins passam user = None e enxergam tudo
    pub async fn list_orders(&self, user: Option<Uuid>) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn find_order(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn sales_for_order(&self, order_id: Uuid) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales WHERE order_id = $1 ORDER BY created_at ASC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    // Vendas soltas, independentes do pedido (relatório de itens)
    pub async fn list_sales(&self) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(sales)
    }

    // Pedidos nunca são editados; só o status transita.
    pub async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }
}
