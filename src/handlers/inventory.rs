// src/handlers/inventory.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{ModInventory, RequireModule},
    models::inventory::AdjustStockPayload,
};

// GET /inventory
pub async fn list_levels(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModInventory>,
) -> Result<impl IntoResponse, AppError> {
    let levels = app_state.inventory_service.list_levels().await?;
    Ok(Json(levels))
}

// GET /inventory/low-stock
pub async fn list_low_stock(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModInventory>,
) -> Result<impl IntoResponse, AppError> {
    let levels = app_state.inventory_service.list_low_stock().await?;
    Ok(Json(levels))
}

// POST /inventory/adjust — reposição manual ou correção
#[utoipa::path(
    post,
    path = "/inventory/adjust",
    request_body = AdjustStockPayload,
    responses(
        (status = 200, description = "Saldo atualizado"),
        (status = 404, description = "Produto sem saldo cadastrado")
    ),
    tag = "inventory"
)]
pub async fn adjust_stock(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModInventory>,
    Json(payload): Json<AdjustStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    let level = app_state.inventory_service.adjust(payload).await?;
    Ok(Json(level))
}
