// src/gateway/types.rs

use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::sales::CartLine;

// Chaves usadas nos metadados opacos da sessão
pub const META_USER_ID: &str = "user_id";
pub const META_CART: &str = "cart";

// Status que o gateway reporta quando o pagamento foi confirmado
pub const PAYMENT_STATUS_PAID: &str = "paid";

/// Sessão de checkout mantida pelo gateway externo.
/// O carrinho viaja inteiro dentro de `metadata` (como JSON opaco) e
/// volta intacto na consulta da fase 2.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,

    // URL de redirecionamento para o pagador (presente na criação)
    pub url: Option<String>,

    // "unpaid" | "paid" | ...
    pub payment_status: String,

    // Total confirmado pelo gateway, em centavos
    pub amount_total: Option<i64>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// Decodifica o carrinho gravado nos metadados na fase 1.
    pub fn cart_lines(&self) -> Result<Vec<CartLine>, serde_json::Error> {
        let raw = self.metadata.get(META_CART).map(String::as_str).unwrap_or("[]");
        serde_json::from_str(raw)
    }

    /// Usuário que abriu a sessão.
    pub fn user_id(&self) -> Option<Uuid> {
        self.metadata
            .get(META_USER_ID)
            .and_then(|v| Uuid::parse_str(v).ok())
    }
}

// Corpo de erro retornado pela API do gateway
#[derive(Debug, Deserialize)]
pub struct GatewayErrorResponse {
    pub error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct GatewayErrorDetail {
    pub message: String,
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn session_with_metadata(cart_json: &str, user: &str) -> CheckoutSession {
        let mut metadata = HashMap::new();
        metadata.insert(META_CART.to_string(), cart_json.to_string());
        metadata.insert(META_USER_ID.to_string(), user.to_string());
        CheckoutSession {
            id: "cs_test_1".into(),
            url: None,
            payment_status: PAYMENT_STATUS_PAID.into(),
            amount_total: Some(3000),
            metadata,
        }
    }

    #[test]
    fn cart_lines_decode_from_metadata() {
        let user = Uuid::new_v4();
        let cart = r#"[{"productId":"b5c0a8e2-62c3-4f8e-9d55-111111111111","quantity":3,"price":10.0}]"#;
        let session = session_with_metadata(cart, &user.to_string());

        let lines = session.cart_lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].price, Decimal::new(100, 1));
        assert_eq!(session.user_id(), Some(user));
    }

    #[test]
    fn missing_metadata_yields_empty_cart() {
        let session = CheckoutSession {
            id: "cs_test_2".into(),
            url: None,
            payment_status: "unpaid".into(),
            amount_total: None,
            metadata: HashMap::new(),
        };

        assert!(session.cart_lines().unwrap().is_empty());
        assert!(session.user_id().is_none());
    }
}
