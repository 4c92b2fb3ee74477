// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload, User},
};

// Handler de registro. A conta criada fica pendente de aprovação.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Conta criada, aguardando aprovação"),
        (status = 409, description = "E-mail já em uso")
    ),
    tag = "auth"
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .auth_service
        .register_user(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Token emitido"),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Conta não aprovada")
    ),
    tag = "auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// Handler da rota protegida /me
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> Result<Json<User>, AppError> {
    let user = app_state.auth_service.find_user(actor.id).await?;
    Ok(Json(user))
}
