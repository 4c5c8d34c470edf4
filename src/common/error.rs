use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::common::i18n::{translate, MessageKey};
use crate::middleware::i18n::Locale;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Token de autorização ausente")]
    MissingToken,

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidPayload(String),

    #[error("Cargo desconhecido: {0}")]
    UnknownRole(String),

    // O backend respondeu, mas com status de erro
    #[error("Backend respondeu {status}: {message:?}")]
    Backend {
        status: StatusCode,
        message: Option<String>,
        details: Option<Value>,
        fallback: MessageKey,
    },

    #[error("Backend inacessível: {0}")]
    Unreachable(#[from] reqwest::Error),

    // Resposta 2xx cujo formato não bate com o contrato esperado
    #[error("Resposta do backend fora do contrato: {0}")]
    UnexpectedPayload(String),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

/// Erro já resolvido para o cliente: status + mensagem no idioma pedido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl AppError {
    pub fn backend(status: StatusCode, body: &Value, fallback: MessageKey) -> Self {
        AppError::Backend {
            status,
            message: backend_message(body),
            details: body.get("errors").cloned(),
            fallback,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::ValidationError(_) | AppError::InvalidPayload(_) | AppError::UnknownRole(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Backend { status, .. } => *status,
            AppError::UnexpectedPayload(_) => StatusCode::BAD_GATEWAY,
            AppError::Unreachable(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let status = self.status();
        let lang = locale.0;

        match self {
            AppError::MissingToken => ApiError::new(status, translate(lang, MessageKey::MissingToken)),
            AppError::ValidationError(errors) => {
                let mut details = Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => Value::String(m.to_string()),
                            None => Value::String(e.code.to_string()),
                        })
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                ApiError {
                    status,
                    message: translate(lang, MessageKey::InvalidFields).to_string(),
                    details: Some(Value::Object(details)),
                }
            }
            AppError::InvalidPayload(reason) => ApiError {
                status,
                message: translate(lang, MessageKey::InvalidPayload).to_string(),
                details: Some(json!({ "body": [reason] })),
            },
            AppError::UnknownRole(role) => ApiError {
                status,
                message: translate(lang, MessageKey::UnknownRole).to_string(),
                details: Some(json!({ "role": [role] })),
            },
            AppError::Backend { status, message, details, fallback } => {
                tracing::warn!(%status, ?message, "Backend rejeitou a requisição");
                ApiError {
                    status,
                    message: message.unwrap_or_else(|| translate(lang, fallback).to_string()),
                    details,
                }
            }
            AppError::Unreachable(e) => {
                tracing::error!("Falha ao contatar o backend: {}", e);
                ApiError::new(status, translate(lang, MessageKey::BackendUnreachable))
            }
            AppError::UnexpectedPayload(reason) => {
                tracing::error!("Contrato do backend violado: {}", reason);
                ApiError::new(status, translate(lang, MessageKey::UnexpectedPayload))
            }
            ref e @ AppError::InternalServerError(_) => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(status, translate(lang, MessageKey::Internal))
            }
        }
    }
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), details: None }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        err.to_api_error(&Locale::default())
    }
}

impl ApiError {
    /// Corpo JSON malformado: responde no mesmo envelope dos demais erros.
    pub fn json_rejection(rejection: JsonRejection, locale: &Locale) -> Self {
        ApiError {
            status: rejection.status(),
            message: translate(locale.0, MessageKey::InvalidPayload).to_string(),
            details: Some(json!({ "body": [rejection.body_text()] })),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "message": self.message,
        });
        if let Some(details) = self.details {
            body["errors"] = details;
        }
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

/// Extrai a mensagem de erro que o backend mandou, se houver.
pub fn backend_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(|v| v.as_str())
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::i18n::Lang;

    #[test]
    fn backend_message_is_preferred_over_fallback() {
        let body = json!({ "message": "Credenciales inválidas" });
        let err = AppError::backend(StatusCode::UNAUTHORIZED, &body, MessageKey::SignInFailed);
        let api = err.to_api_error(&Locale(Lang::Es));

        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.message, "Credenciales inválidas");
    }

    #[test]
    fn fallback_is_localized_when_backend_is_silent() {
        let err = AppError::backend(StatusCode::NOT_FOUND, &Value::Null, MessageKey::DeleteFailed);
        let api = err.to_api_error(&Locale(Lang::En));

        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "Could not delete the record");
    }

    #[test]
    fn validation_errors_from_backend_are_relayed() {
        let body = json!({ "message": "", "errors": { "price": ["required"] } });
        let api = AppError::backend(StatusCode::UNPROCESSABLE_ENTITY, &body, MessageKey::SaveFailed)
            .to_api_error(&Locale(Lang::Es));

        assert_eq!(api.message, "Error al guardar los datos");
        assert_eq!(api.details, Some(json!({ "price": ["required"] })));
    }

    #[test]
    fn error_key_is_read_when_message_is_missing() {
        assert_eq!(backend_message(&json!({ "error": "Unauthenticated." })).as_deref(), Some("Unauthenticated."));
        assert_eq!(backend_message(&json!([1, 2])), None);
    }
}
