// src/handlers/sales.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ModCart, ModSales, RequireModule},
    },
    models::{
        rbac::SUPER_ADMIN_SLUG,
        sales::{
            CheckoutPayload, CheckoutResponse, CheckoutSessionResponse, OrderWithSales,
            UpdateOrderStatusPayload, VerifyPaymentPayload,
        },
    },
};

// ---
// Checkout direto
// ---
#[utoipa::path(
    post,
    path = "/sales/checkout",
    request_body = CheckoutPayload,
    responses(
        (status = 201, body = CheckoutResponse, description = "Pedido criado"),
        (status = 400, description = "Carrinho vazio ou estoque insuficiente"),
        (status = 403, description = "Sem permissão para o módulo Cart")
    ),
    security(("bearer_auth" = [])),
    tag = "sales"
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireModule<ModCart>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (order, sales) = app_state
        .checkout_service
        .checkout_direct(user.0.id, payload.items)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            message: "Order placed successfully".into(),
            order_id: order.id,
            sales,
        }),
    ))
}

// ---
// Fluxo com gateway — Fase 1
// ---
#[utoipa::path(
    post,
    path = "/sales/create-checkout-session",
    request_body = CheckoutPayload,
    responses(
        (status = 200, body = CheckoutSessionResponse, description = "Sessão criada no gateway"),
        (status = 400, description = "Carrinho vazio ou estoque insuficiente"),
        (status = 502, description = "Gateway indisponível")
    ),
    security(("bearer_auth" = [])),
    tag = "sales"
)]
pub async fn create_checkout_session(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireModule<ModCart>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state
        .checkout_service
        .create_session(user.0.id, payload.items)
        .await?;

    Ok(Json(CheckoutSessionResponse {
        url: session.url.clone().unwrap_or_default(),
        id: session.id,
    }))
}

// ---
// Fluxo com gateway — Fase 2
// ---
#[utoipa::path(
    post,
    path = "/sales/verify-payment",
    request_body = VerifyPaymentPayload,
    responses(
        (status = 201, body = CheckoutResponse, description = "Pagamento confirmado, pedido criado"),
        (status = 400, description = "Pagamento não confirmado"),
        (status = 502, description = "Gateway indisponível")
    ),
    security(("bearer_auth" = [])),
    tag = "sales"
)]
pub async fn verify_payment(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    _guard: RequireModule<ModCart>,
    Json(payload): Json<VerifyPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (order, sales) = app_state
        .checkout_service
        .verify_payment(&payload.session_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            message: "Payment verified and order placed".into(),
            order_id: order.id,
            sales,
        }),
    ))
}

// ---
// Relatórios
// ---

// GET /sales — itens de venda soltos, para relatório
pub async fn list_sales(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModSales>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.sales_repo.list_sales().await?;
    Ok(Json(sales))
}

// GET /orders — admins enxergam tudo; os demais, só os próprios pedidos
pub async fn list_orders(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireModule<ModSales>,
) -> Result<impl IntoResponse, AppError> {
    let scope = if user.0.role == SUPER_ADMIN_SLUG || user.0.role == "admin" {
        None
    } else {
        Some(user.0.id)
    };

    let orders = app_state.sales_repo.list_orders(scope).await?;
    Ok(Json(orders))
}

// GET /orders/{id}
pub async fn get_order(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModSales>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .sales_repo
        .find_order(id)
        .await?
        .ok_or(AppError::OrderNotFound)?;

    let sales = app_state.sales_repo.sales_for_order(order.id).await?;

    Ok(Json(OrderWithSales { order, sales }))
}

// PATCH /orders/{id}/status — só o status transita; nada mais muda
pub async fn update_order_status(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModSales>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .sales_repo
        .update_order_status(id, payload.status)
        .await?
        .ok_or(AppError::OrderNotFound)?;

    Ok(Json(order))
}
