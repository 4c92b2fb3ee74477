// src/handlers/rbac.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ModRoles, RequireModule},
    },
    models::rbac::{CreateRolePayload, UpdateRolePayload},
};
use uuid::Uuid;

// POST /roles
pub async fn create_role(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModRoles>,
    Json(payload): Json<CreateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .rbac_service
        .create_role_with_modules(payload.name, payload.slug, payload.modules)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

// GET /roles
pub async fn list_roles(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModRoles>,
) -> Result<impl IntoResponse, AppError> {
    let roles = app_state.rbac_service.list_roles().await?;
    Ok(Json(roles))
}

// PUT /roles/{id} — a lista de módulos substitui a anterior por inteiro
pub async fn update_role(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModRoles>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    let response = app_state
        .rbac_service
        .update_role_modules(id, payload.name, payload.modules)
        .await?;

    Ok(Json(response))
}

// DELETE /roles/{id}
pub async fn delete_role(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModRoles>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.rbac_service.delete_role(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /modules (para o frontend montar a tela de edição de cargo)
#[utoipa::path(
    get,
    path = "/modules",
    responses((status = 200, description = "Todos os módulos do sistema")),
    tag = "rbac"
)]
pub async fn list_modules(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModRoles>,
) -> Result<impl IntoResponse, AppError> {
    let modules = app_state.rbac_service.list_modules().await?;
    Ok(Json(modules))
}

// GET /auth/permissions
// Endpoint de "pull" do frontend: buscado no login e rebuscado depois
// que um administrador edita um cargo. Exige só autenticação — todo
// usuário consulta o próprio menu, nunca o dos outros.
pub async fn my_modules(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let modules = app_state
        .rbac_service
        .modules_for_role_slug(&user.0.role)
        .await?;
    Ok(Json(modules))
}
