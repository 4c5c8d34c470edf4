// src/services/backend.rs

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::{
    common::{error::AppError, i18n::MessageKey},
    middleware::request_id::REQUEST_ID_HEADER,
};

/// Como a chamada ao backend se autentica.
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    /// Token do próprio cliente, repassado como veio.
    Bearer(&'a str),
    /// Token fixo de serviço (`API_TOKEN_CRUD`).
    Static,
    None,
}

// Uma chamada ao backend externo
#[derive(Debug)]
pub struct BackendRequest<'a> {
    pub method: Method,
    pub path: String,
    pub auth: Auth<'a>,
    pub body: Option<Value>,
    pub request_id: Option<&'a str>,
    /// Mensagem usada se o backend falhar sem explicar o motivo.
    pub fallback: MessageKey,
}

impl<'a> BackendRequest<'a> {
    pub fn new(method: Method, path: impl Into<String>, fallback: MessageKey) -> Self {
        Self {
            method,
            path: path.into(),
            auth: Auth::None,
            body: None,
            request_id: None,
            fallback,
        }
    }

    pub fn auth(mut self, auth: Auth<'a>) -> Self {
        self.auth = auth;
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn request_id(mut self, request_id: Option<&'a str>) -> Self {
        self.request_id = request_id;
        self
    }
}

/// Resposta 2xx do backend, repassada sem alterações.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for BackendReply {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT || self.body.is_null() {
            return self.status.into_response();
        }
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    service_token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str, service_token: Option<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(AppError::Unreachable)?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            service_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_service_token(&self) -> bool {
        self.service_token.is_some()
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Envia a chamada; qualquer status fora de 2xx vira `AppError::Backend`.
    pub async fn send(&self, request: BackendRequest<'_>) -> Result<BackendReply, AppError> {
        let url = self.endpoint(&request.path);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");

        match request.auth {
            Auth::Bearer(token) => builder = builder.bearer_auth(token),
            Auth::Static => {
                if let Some(token) = &self.service_token {
                    builder = builder.bearer_auth(token);
                }
            }
            Auth::None => {}
        }

        if let Some(id) = request.request_id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, %url, "Repassando ao backend");

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = decode_body(&bytes);

        if status.is_success() {
            Ok(BackendReply { status, body })
        } else {
            Err(AppError::backend(status, &body, request.fallback))
        }
    }
}

fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim().trim_end_matches('/'))
}

// Corpo vazio vira Null; texto que não é JSON é mantido como string
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
