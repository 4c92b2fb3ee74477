// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Sales / Checkout ---
        handlers::sales::checkout,
        handlers::sales::create_checkout_session,
        handlers::sales::verify_payment,

        // --- Catalog ---
        handlers::catalog::list_products,

        // --- Inventory ---
        handlers::inventory::adjust_stock,

        // --- RBAC ---
        handlers::rbac::list_modules,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::sales::CheckoutPayload,
            models::sales::CartItemPayload,
            models::sales::VerifyPaymentPayload,
            models::sales::CheckoutResponse,
            models::sales::CheckoutSessionResponse,
            models::sales::Sale,
            models::sales::Order,
            models::sales::OrderStatus,
            models::inventory::AdjustStockPayload,
            models::inventory::InventoryLevel,
            models::catalog::Product,
            models::catalog::ProductStatus,
            models::rbac::Role,
            models::rbac::Module,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registro e login"),
        (name = "sales", description = "Checkout e relatórios de venda"),
        (name = "catalog", description = "Catálogo de produtos"),
        (name = "inventory", description = "Saldo de estoque"),
        (name = "rbac", description = "Cargos e módulos"),
        (name = "dashboard", description = "Resumo da operação"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
