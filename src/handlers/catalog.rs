// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ModProducts, RequireModule},
    },
    models::catalog::{CreateProductPayload, UpdateProductPayload},
};

// POST /products — cria o produto e o saldo de estoque juntos
pub async fn create_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireModule<ModProducts>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .catalog_service
        .create_product(&user.0, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /products — lojistas só enxergam os próprios
#[utoipa::path(
    get,
    path = "/products",
    responses((status = 200, description = "Catálogo visível para o ator")),
    tag = "catalog"
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireModule<ModProducts>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.catalog_service.list_products(&user.0).await?;
    Ok(Json(products))
}

// GET /products/{id}
pub async fn get_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireModule<ModProducts>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.catalog_service.get_product(&user.0, id).await?;
    Ok(Json(product))
}

// PATCH /products/{id}
pub async fn update_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireModule<ModProducts>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .catalog_service
        .update_product(&user.0, id, payload)
        .await?;
    Ok(Json(product))
}

// DELETE /products/{id}
pub async fn delete_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireModule<ModProducts>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_product(&user.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
