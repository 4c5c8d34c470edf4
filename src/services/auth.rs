// src/services/auth.rs

use axum::http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    common::{error::AppError, i18n::MessageKey},
    models::auth::{BackendSignIn, BackendUserReply, SignInPayload, SignUpPayload, User},
    services::backend::{Auth, BackendClient, BackendRequest},
};

// Rotas de autenticação no backend externo
const LOGIN_PATH: &str = "login";
const REGISTER_PATH: &str = "register";
const LOGOUT_PATH: &str = "logout";
const PROFILE_PATH: &str = "profile";

/// Resultado de uma chamada de autenticação: status do backend + dados tipados.
#[derive(Debug)]
pub struct AuthOutcome<T> {
    pub status: StatusCode,
    pub message: Option<String>,
    pub data: T,
}

#[derive(Clone)]
pub struct AuthService {
    backend: BackendClient,
}

impl AuthService {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    pub async fn sign_in(
        &self,
        payload: &SignInPayload,
        request_id: Option<&str>,
    ) -> Result<AuthOutcome<(User, String)>, AppError> {
        let reply = self
            .backend
            .send(
                BackendRequest::new(Method::POST, LOGIN_PATH, MessageKey::SignInFailed)
                    .json(to_json(payload)?)
                    .request_id(request_id),
            )
            .await?;

        let session: BackendSignIn = decode_contract(LOGIN_PATH, reply.body)?;
        tracing::info!(user_id = %session.user.id, "Login efetuado");

        Ok(AuthOutcome {
            status: reply.status,
            message: session.message,
            data: (session.user, session.token),
        })
    }

    pub async fn sign_up(
        &self,
        payload: &SignUpPayload,
        request_id: Option<&str>,
    ) -> Result<AuthOutcome<User>, AppError> {
        let reply = self
            .backend
            .send(
                BackendRequest::new(Method::POST, REGISTER_PATH, MessageKey::SignUpFailed)
                    .json(to_json(payload)?)
                    .request_id(request_id),
            )
            .await?;

        let (user, message) = decode_contract::<BackendUserReply>(REGISTER_PATH, reply.body)?.into_parts();
        tracing::info!(user_id = %user.id, "Novo usuário registrado");

        Ok(AuthOutcome { status: reply.status, message, data: user })
    }

    pub async fn logout(&self, token: &str, request_id: Option<&str>) -> Result<AuthOutcome<()>, AppError> {
        let reply = self
            .backend
            .send(
                BackendRequest::new(Method::POST, LOGOUT_PATH, MessageKey::LogoutFailed)
                    .auth(Auth::Bearer(token))
                    .request_id(request_id),
            )
            .await?;

        Ok(AuthOutcome {
            status: reply.status,
            message: reply.body.get("message").and_then(Value::as_str).map(str::to_string),
            data: (),
        })
    }

    pub async fn profile(&self, token: &str, request_id: Option<&str>) -> Result<AuthOutcome<User>, AppError> {
        let reply = self
            .backend
            .send(
                BackendRequest::new(Method::GET, PROFILE_PATH, MessageKey::ProfileFailed)
                    .auth(Auth::Bearer(token))
                    .request_id(request_id),
            )
            .await?;

        let (user, message) = decode_contract::<BackendUserReply>(PROFILE_PATH, reply.body)?.into_parts();

        Ok(AuthOutcome { status: reply.status, message, data: user })
    }
}

fn to_json<T: serde::Serialize>(payload: &T) -> Result<Value, AppError> {
    serde_json::to_value(payload).map_err(|e| AppError::InternalServerError(e.into()))
}

// Falha rápido se o backend devolver algo fora do contrato
fn decode_contract<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::UnexpectedPayload(format!("{endpoint}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sign_in_contract_requires_token() {
        let body = json!({ "user": { "id": 1, "name": "Ana", "email": "a@b.com" } });
        let err = decode_contract::<BackendSignIn>(LOGIN_PATH, body).unwrap_err();
        assert!(matches!(err, AppError::UnexpectedPayload(msg) if msg.starts_with("login")));
    }

    #[test]
    fn sign_in_contract_accepts_access_token_alias() {
        let body = json!({
            "access_token": "abc",
            "user": { "id": 1, "name": "Ana", "email": "a@b.com", "role": "moderator" }
        });
        let session = decode_contract::<BackendSignIn>(LOGIN_PATH, body).unwrap();
        assert_eq!(session.token, "abc");
    }
}
