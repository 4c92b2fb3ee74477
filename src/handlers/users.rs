// src/handlers/users.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{ModUsers, RequireModule},
    models::auth::AccountStatus,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: AccountStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolePayload {
    pub role_slug: String,
}

pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModUsers>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list_users().await?;
    Ok(Json(users))
}

// Aprovação/rejeição de contas pendentes
pub async fn update_user_status(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModUsers>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.user_service.set_status(id, payload.status).await?;
    Ok(Json(user))
}

pub async fn update_user_role(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModUsers>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_service
        .change_role(id, &payload.role_slug)
        .await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModUsers>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
