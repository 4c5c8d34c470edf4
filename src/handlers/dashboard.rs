// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedCaller, i18n::Locale},
    models::dashboard::DashboardSummary,
};

// GET /dashboard/summary
#[utoipa::path(
    get,
    path = "/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais, receita, estados dos serviços e atividade recente", body = DashboardSummary),
        (status = 401, description = "Token ausente"),
        (status = 502, description = "Backend devolveu uma coleção em formato inesperado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    caller: AuthenticatedCaller,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .get_summary(&caller.token, caller.request_id.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(summary)))
}
