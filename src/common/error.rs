// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::gateway::GatewayError;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail already in use")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Account is not active")]
    AccountNotActive,

    // Negado pelo portão de módulos. Carrega o nome do módulo que faltou.
    #[error("Access denied. No permission for module: {0}")]
    AccessDenied(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Role not found")]
    RoleNotFound,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Order not found")]
    OrderNotFound,

    // Regra de negócio do checkout: a batch inteira cai se um item faltar.
    #[error("Insufficient stock for product id {0}")]
    InsufficientStock(Uuid),

    #[error("Cart has no valid items")]
    EmptyCart,

    #[error("Payment has not been completed")]
    PaymentNotCompleted,

    // Só pode existir um super admin (checagem em aplicação, não no banco)
    #[error("A super admin user already exists")]
    SuperAdminAlreadyExists,

    #[error("System roles cannot be modified or deleted")]
    SystemRoleProtected,

    #[error("{0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados
    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Payment gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "E-mail already in use.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid e-mail or password.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authentication token.".to_string(),
            ),
            AppError::AccountNotActive => {
                (StatusCode::FORBIDDEN, "Account is not active.".to_string())
            }

            // A mensagem nomeia o módulo que faltou, para o frontend
            // explicar o que pedir ao administrador.
            AppError::AccessDenied(module) => (
                StatusCode::FORBIDDEN,
                format!("Access denied. No permission for module: {module}"),
            ),

            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found.".to_string()),
            AppError::RoleNotFound => (StatusCode::NOT_FOUND, "Role not found.".to_string()),
            AppError::ProductNotFound => {
                (StatusCode::NOT_FOUND, "Product not found.".to_string())
            }
            AppError::OrderNotFound => (StatusCode::NOT_FOUND, "Order not found.".to_string()),

            AppError::InsufficientStock(product_id) => (
                StatusCode::BAD_REQUEST,
                format!("Insufficient stock for product id {product_id}"),
            ),
            AppError::EmptyCart => {
                (StatusCode::BAD_REQUEST, "Cart has no valid items.".to_string())
            }
            AppError::PaymentNotCompleted => (
                StatusCode::BAD_REQUEST,
                "Payment has not been completed.".to_string(),
            ),

            AppError::SuperAdminAlreadyExists => (
                StatusCode::CONFLICT,
                "A super admin user already exists.".to_string(),
            ),
            AppError::SystemRoleProtected => (
                StatusCode::CONFLICT,
                "System roles cannot be modified or deleted.".to_string(),
            ),
            AppError::UniqueConstraintViolation(msg) => (StatusCode::CONFLICT, msg),

            AppError::GatewayError(ref e) => {
                tracing::error!("Erro no gateway de pagamento: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Payment gateway is unavailable.".to_string(),
                )
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
