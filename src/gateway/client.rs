// src/gateway/client.rs

use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::time::Duration;
use uuid::Uuid;

use super::types::{CheckoutSession, GatewayErrorResponse, META_CART, META_USER_ID};
use crate::models::sales::CartLine;

/// Erros do gateway de pagamento.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Cliente HTTP do gateway de pagamento.
/// A base_url é configurável (ambiente de teste aponta para um mock).
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GatewayClient {
    /// # Panics
    ///
    /// Entra em pânico se o cliente HTTP não puder ser construído.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Falha ao construir o cliente HTTP");

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Cria uma sessão de checkout carregando o carrinho como metadado opaco.
    ///
    /// O gateway guarda `metadata[cart]` (JSON das linhas) e `metadata[user_id]`
    /// e devolve os dois intactos quando a sessão é consultada.
    pub async fn create_checkout_session(
        &self,
        user_id: Uuid,
        lines: &[CartLine],
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, GatewayError> {
        let cart_json = serde_json::to_string(lines)?;

        let mut params: Vec<(String, String)> = vec![
            ("mode".into(), "payment".to_string()),
            ("success_url".into(), success_url.to_string()),
            ("cancel_url".into(), cancel_url.to_string()),
            ("client_reference_id".into(), user_id.to_string()),
            (format!("metadata[{META_USER_ID}]"), user_id.to_string()),
            (format!("metadata[{META_CART}]"), cart_json),
        ];

        for (i, line) in lines.iter().enumerate() {
            params.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                to_cents(line.price).to_string(),
            ));
            params.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                line.product_id.to_string(),
            ));
            params.push((
                format!("line_items[{i}][quantity]"),
                line.quantity.to_string(),
            ));
        }

        tracing::debug!(
            user_id = %user_id,
            lines = lines.len(),
            "Criando sessão de checkout no gateway"
        );

        let response = self
            .client
            .post(format!("{}/checkout/sessions", self.base_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Consulta uma sessão pelo id (fase 2: verificação do pagamento).
    pub async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, GatewayError> {
        let response = self
            .client
            .get(format!("{}/checkout/sessions/{}", self.base_url, session_id))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body: Result<GatewayErrorResponse, _> = response.json().await;

        match error_body {
            Ok(body) => Err(GatewayError::Api {
                status: status.as_u16(),
                message: body.error.message,
                code: body.error.code,
            }),
            Err(_) => Err(GatewayError::Api {
                status: status.as_u16(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}

// Converte um preço decimal para centavos inteiros (truncando)
fn to_cents(price: Decimal) -> i64 {
    (price * Decimal::from(100)).trunc().to_i64().unwrap_or(0)
}

/// Centavos confirmados pelo gateway -> valor decimal.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::from(cents) / Decimal::from(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_cents_truncates() {
        assert_eq!(to_cents(Decimal::new(1000, 2)), 1000); // 10.00
        assert_eq!(to_cents(Decimal::new(2490, 2)), 2490); // 24.90
        assert_eq!(to_cents(Decimal::new(10999, 3)), 1099); // 10.999 -> 10.99
    }

    #[test]
    fn cents_round_trip() {
        assert_eq!(cents_to_decimal(3000), Decimal::from(30));
        assert_eq!(cents_to_decimal(2490), Decimal::new(2490, 2));
    }
}
