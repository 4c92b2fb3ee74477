//! Testes do cliente do gateway de pagamento contra um servidor mockado.
//! Nenhuma chamada de rede real é feita.

use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use backoffice::gateway::{GatewayClient, GatewayError, PAYMENT_STATUS_PAID};
use backoffice::models::sales::CartLine;

fn sample_lines(product_id: Uuid) -> Vec<CartLine> {
    vec![CartLine {
        product_id,
        quantity: 3,
        price: Decimal::new(1000, 2), // 10.00
    }]
}

#[tokio::test]
async fn create_session_posts_cart_as_metadata() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/checkout/sessions"))
        // O carrinho viaja como metadado form-encoded ("metadata[cart]")
        .and(body_string_contains("metadata%5Bcart%5D"))
        .and(body_string_contains("metadata%5Buser_id%5D"))
        .and(body_string_contains("mode=payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_123",
            "url": "https://gateway.test/pay/cs_test_123",
            "payment_status": "unpaid",
            "amount_total": 3000,
            "metadata": {
                "user_id": user_id.to_string(),
                "cart": "[]"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GatewayClient::new(server.uri(), "sk_test_xyz");
    let session = client
        .create_checkout_session(
            user_id,
            &sample_lines(product_id),
            "http://localhost/success",
            "http://localhost/cancel",
        )
        .await
        .unwrap();

    assert_eq!(session.id, "cs_test_123");
    assert_eq!(
        session.url.as_deref(),
        Some("https://gateway.test/pay/cs_test_123")
    );
    assert_ne!(session.payment_status, PAYMENT_STATUS_PAID);
}

#[tokio::test]
async fn retrieve_session_surfaces_status_and_cart() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();

    let cart_json = format!(
        r#"[{{"productId":"{product_id}","quantity":2,"price":24.9}}]"#
    );

    Mock::given(method("GET"))
        .and(path("/checkout/sessions/cs_test_456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_456",
            "url": null,
            "payment_status": "paid",
            "amount_total": 4980,
            "metadata": {
                "user_id": user_id.to_string(),
                "cart": cart_json
            }
        })))
        .mount(&server)
        .await;

    let client = GatewayClient::new(server.uri(), "sk_test_xyz");
    let session = client.retrieve_checkout_session("cs_test_456").await.unwrap();

    assert_eq!(session.payment_status, PAYMENT_STATUS_PAID);
    assert_eq!(session.amount_total, Some(4980));
    assert_eq!(session.user_id(), Some(user_id));

    let lines = session.cart_lines().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, product_id);
    assert_eq!(lines[0].quantity, 2);
}

#[tokio::test]
async fn gateway_error_body_becomes_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checkout/sessions/cs_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "message": "No such checkout session",
                "code": "resource_missing"
            }
        })))
        .mount(&server)
        .await;

    let client = GatewayClient::new(server.uri(), "sk_test_xyz");
    let err = client
        .retrieve_checkout_session("cs_missing")
        .await
        .unwrap_err();

    match err {
        GatewayError::Api { status, message, code } => {
            assert_eq!(status, 404);
            assert_eq!(message, "No such checkout session");
            assert_eq!(code.as_deref(), Some("resource_missing"));
        }
        other => panic!("esperava GatewayError::Api, veio: {other:?}"),
    }
}
