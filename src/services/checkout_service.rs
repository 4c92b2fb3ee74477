// src/services/checkout_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, SalesRepository},
    gateway::{CheckoutSession, GatewayClient, PAYMENT_STATUS_PAID, cents_to_decimal},
    models::sales::{CartItemPayload, CartLine, Order, Sale},
};

/// Sanitiza o carrinho: linhas sem produto, com quantidade não positiva
/// ou preço negativo são descartadas em silêncio e o resto segue.
/// (Falta de estoque, ao contrário, derruba a batch inteira.)
pub fn sanitize_cart(items: Vec<CartItemPayload>) -> Vec<CartLine> {
    items
        .into_iter()
        .filter_map(|item| {
            let product_id = item.product_id?;
            let quantity = item.quantity?;
            let price = item.price?;

            if product_id.is_nil() || quantity <= 0 || price < Decimal::ZERO {
                return None;
            }

            Some(CartLine {
                product_id,
                quantity,
                price,
            })
        })
        .collect()
}

#[derive(Clone)]
pub struct CheckoutService {
    sales_repo: SalesRepository,
    inventory_repo: InventoryRepository,
    gateway: GatewayClient,
    success_url: String,
    cancel_url: String,
    pool: PgPool,
}

impl CheckoutService {
    pub fn new(
        sales_repo: SalesRepository,
        inventory_repo: InventoryRepository,
        gateway: GatewayClient,
        success_url: String,
        cancel_url: String,
        pool: PgPool,
    ) -> Self {
        Self {
            sales_repo,
            inventory_repo,
            gateway,
            success_url,
            cancel_url,
            pool,
        }
    }

    // ---
    // Fluxo direto (preço vem do cliente, confiado como está)
    // ---
    pub async fn checkout_direct(
        &self,
        user_id: Uuid,
        items: Vec<CartItemPayload>,
    ) -> Result<(Order, Vec<Sale>), AppError> {
        let lines = sanitize_cart(items);
        if lines.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let total: Decimal = lines.iter().map(CartLine::line_total).sum();

        self.place_order(user_id, &lines, total, None).await
    }

    // ---
    // Fluxo com gateway — Fase 1: criar a sessão externa
    // ---
    /// Checa o saldo de cada item (leitura simples, nada é reservado: o
    /// estoque pode mudar até a fase 2) e abre a sessão no gateway com o
    /// carrinho embarcado como metadado opaco.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        items: Vec<CartItemPayload>,
    ) -> Result<CheckoutSession, AppError> {
        let lines = sanitize_cart(items);
        if lines.is_empty() {
            return Err(AppError::EmptyCart);
        }

        for line in &lines {
            let current = self
                .inventory_repo
                .get_level(line.product_id)
                .await?
                .map(|level| level.quantity)
                .unwrap_or(0);

            if current < line.quantity {
                return Err(AppError::InsufficientStock(line.product_id));
            }
        }

        let session = self
            .gateway
            .create_checkout_session(user_id, &lines, &self.success_url, &self.cancel_url)
            .await?;

        tracing::info!(session_id = %session.id, user_id = %user_id, "Sessão de checkout criada");
        Ok(session)
    }

    // ---
    // Fluxo com gateway — Fase 2: verificar e efetivar
    // ---
    /// Consulta a sessão no gateway; se o pagamento foi confirmado, executa
    /// a mesma sequência atômica do fluxo direto usando o total confirmado
    /// pelo gateway. Nenhuma marca de "sessão já processada" é gravada:
    /// reapresentar o mesmo id cria um pedido novo.
    pub async fn verify_payment(&self, session_id: &str) -> Result<(Order, Vec<Sale>), AppError> {
        let session = self.gateway.retrieve_checkout_session(session_id).await?;

        if session.payment_status != PAYMENT_STATUS_PAID {
            return Err(AppError::PaymentNotCompleted);
        }

        let lines = session
            .cart_lines()
            .map_err(crate::gateway::GatewayError::Serialization)?;
        if lines.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let user_id = session.user_id().ok_or_else(|| {
            AppError::InternalServerError(anyhow::anyhow!(
                "Sessão {} sem user_id nos metadados",
                session.id
            ))
        })?;

        // O total que vale é o confirmado pelo gateway, não o do cliente
        let total = session
            .amount_total
            .map(cents_to_decimal)
            .unwrap_or_else(|| lines.iter().map(CartLine::line_total).sum());

        self.place_order(user_id, &lines, total, Some(&session.id)).await
    }

    // ---
    // Sequência atômica compartilhada pelos dois fluxos
    // ---
    async fn place_order(
        &self,
        user_id: Uuid,
        lines: &[CartLine],
        total: Decimal,
        payment_session_id: Option<&str>,
    ) -> Result<(Order, Vec<Sale>), AppError> {
        // 1. Inicia Transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria o Pedido
        let order = self
            .sales_repo
            .create_order(&mut *tx, user_id, total, payment_session_id)
            .await?;

        // 3. Para cada linha, na ordem do carrinho: relê o saldo atual,
        //    grava a venda e baixa o estoque
        let mut sales = Vec::with_capacity(lines.len());
        for line in lines {
            let current = self
                .inventory_repo
                .get_quantity(&mut *tx, line.product_id)
                .await?
                .unwrap_or(0);

            if current < line.quantity {
                // Um item sem saldo derruba a batch inteira
                tx.rollback().await?;
                return Err(AppError::InsufficientStock(line.product_id));
            }

            let sale = self
                .sales_repo
                .create_sale(&mut *tx, order.id, line.product_id, line.quantity, line.line_total())
                .await?;

            self.inventory_repo
                .decrement_quantity(&mut *tx, line.product_id, line.quantity)
                .await?;

            sales.push(sale);
        }

        // 4. Commit
        tx.commit().await?;

        tracing::info!(
            order_id = %order.id,
            items = sales.len(),
            total = %total,
            "Pedido fechado"
        );

        Ok((order, sales))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: Option<Uuid>, quantity: Option<i32>, price: Option<Decimal>) -> CartItemPayload {
        CartItemPayload {
            product_id,
            quantity,
            price,
        }
    }

    #[test]
    fn sanitize_keeps_valid_lines() {
        let id = Uuid::new_v4();
        let lines = sanitize_cart(vec![item(Some(id), Some(3), Some(Decimal::from(10)))]);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, id);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].line_total(), Decimal::from(30));
    }

    #[test]
    fn sanitize_drops_malformed_lines_silently() {
        let id = Uuid::new_v4();
        let lines = sanitize_cart(vec![
            item(None, Some(2), Some(Decimal::from(5))), // sem produto
            item(Some(id), Some(0), Some(Decimal::from(5))), // quantidade zero
            item(Some(id), Some(-1), Some(Decimal::from(5))), // quantidade negativa
            item(Some(id), None, Some(Decimal::from(5))), // sem quantidade
            item(Some(id), Some(2), None),                // sem preço
            item(Some(id), Some(2), Some(Decimal::from(-1))), // preço negativo
            item(Some(Uuid::nil()), Some(2), Some(Decimal::from(5))), // produto nulo
            item(Some(id), Some(2), Some(Decimal::from(5))), // válida
        ]);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn sanitize_of_all_garbage_is_empty() {
        let lines = sanitize_cart(vec![
            item(None, None, None),
            item(None, Some(1), Some(Decimal::ONE)),
        ]);
        assert!(lines.is_empty());
    }

    #[test]
    fn totals_accumulate_per_line() {
        let lines = vec![
            CartLine {
                product_id: Uuid::new_v4(),
                quantity: 3,
                price: Decimal::new(1000, 2), // 10.00
            },
            CartLine {
                product_id: Uuid::new_v4(),
                quantity: 2,
                price: Decimal::new(250, 2), // 2.50
            },
        ];

        let total: Decimal = lines.iter().map(CartLine::line_total).sum();
        assert_eq!(total, Decimal::new(3500, 2)); // 30.00 + 5.00
    }
}
