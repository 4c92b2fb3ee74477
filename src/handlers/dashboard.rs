// src/handlers/dashboard.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{ModDashboard, RequireModule},
};

// GET /dashboard/summary
#[utoipa::path(
    get,
    path = "/dashboard/summary",
    responses((status = 200, description = "Resumo geral da operação")),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _guard: RequireModule<ModDashboard>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_repo.get_summary().await?;
    Ok(Json(summary))
}
