// src/handlers/auth.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::{translate, MessageKey},
    },
    config::AppState,
    middleware::{auth::AuthenticatedCaller, i18n::Locale, json::LocalizedJson, request_id::RequestId},
    models::auth::{MessageEnvelope, SignInPayload, SignInResponse, SignUpPayload, UserEnvelope},
};

// POST /signin
#[utoipa::path(
    post,
    path = "/signin",
    tag = "Auth",
    request_body = SignInPayload,
    responses(
        (status = 200, description = "Sessão iniciada", body = SignInResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Credenciais rejeitadas pelo backend")
    )
)]
pub async fn sign_in(
    State(app_state): State<AppState>,
    locale: Locale,
    request_id: RequestId,
    LocalizedJson(payload): LocalizedJson<SignInPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let outcome = app_state
        .auth_service
        .sign_in(&payload, Some(&request_id.0))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let (user, token) = outcome.data;
    let body = SignInResponse {
        success: true,
        message: outcome
            .message
            .unwrap_or_else(|| translate(locale.0, MessageKey::SignInOk).to_string()),
        user,
        token,
    };

    Ok((outcome.status, Json(body)))
}

// POST /signup
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body = SignUpPayload,
    responses(
        (status = 201, description = "Usuário registrado", body = UserEnvelope),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn sign_up(
    State(app_state): State<AppState>,
    locale: Locale,
    request_id: RequestId,
    LocalizedJson(payload): LocalizedJson<SignUpPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let outcome = app_state
        .auth_service
        .sign_up(&payload, Some(&request_id.0))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let body = UserEnvelope {
        success: true,
        message: outcome
            .message
            .unwrap_or_else(|| translate(locale.0, MessageKey::SignUpOk).to_string()),
        user: outcome.data,
    };

    Ok((outcome.status, Json(body)))
}

// POST /logout
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Sessão encerrada no backend", body = MessageEnvelope),
        (status = 401, description = "Token ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    locale: Locale,
    caller: AuthenticatedCaller,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .auth_service
        .logout(&caller.token, caller.request_id.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let body = MessageEnvelope {
        success: true,
        message: outcome
            .message
            .unwrap_or_else(|| translate(locale.0, MessageKey::LogoutOk).to_string()),
    };

    Ok((outcome.status, Json(body)))
}

// GET /profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário dono do token", body = UserEnvelope),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn profile(
    State(app_state): State<AppState>,
    locale: Locale,
    caller: AuthenticatedCaller,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .auth_service
        .profile(&caller.token, caller.request_id.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let body = UserEnvelope {
        success: true,
        message: outcome
            .message
            .unwrap_or_else(|| translate(locale.0, MessageKey::ProfileOk).to_string()),
        user: outcome.data,
    };

    Ok((outcome.status, Json(body)))
}
