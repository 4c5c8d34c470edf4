use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{
    common::error::{ApiError, AppError},
    middleware::{i18n::Locale, request_id::RequestId},
};

/// Token bearer recebido do cliente, inserido nas extensions pelo `auth_guard`.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

// Barra qualquer requisição sem `Authorization: Bearer ...` antes de tocar no backend.
pub async fn auth_guard(
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .filter(|token| !token.is_empty());

    match token {
        Some(token) => {
            request.extensions_mut().insert(BearerToken(token));
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "Requisição sem token rejeitada");
            Err(AppError::MissingToken.to_api_error(&locale))
        }
    }
}

// Extrator usado pelos handlers protegidos: quem chama + id de correlação
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    pub token: String,
    pub request_id: Option<String>,
}

impl<S> FromRequestParts<S> for AuthenticatedCaller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .extensions
            .get::<BearerToken>()
            .map(|t| t.0.clone())
            .ok_or_else(|| AppError::MissingToken.to_api_error(&Locale::from_headers(&parts.headers)))?;

        let request_id = parts.extensions.get::<RequestId>().map(|id| id.0.clone());

        Ok(AuthenticatedCaller { token, request_id })
    }
}
