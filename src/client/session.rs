// src/client/session.rs

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    client::{error::ClientError, token_store::TokenStore},
    common::error::backend_message,
    models::{
        auth::{MessageEnvelope, SignInPayload, SignInResponse, SignUpPayload, User, UserEnvelope},
        rbac::{self, Permission, Role},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated(User),
}

/// Formulário de cadastro como o painel o coleta.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub country: String,
    pub accept_terms: bool,
}

impl SignUpForm {
    fn check(&self) -> Result<(), ClientError> {
        let required = [&self.name, &self.email, &self.password, &self.confirm_password, &self.country];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(ClientError::Validation("Todos los campos son obligatorios.".into()));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::Validation("Las contraseñas no coinciden.".into()));
        }
        if !self.accept_terms {
            return Err(ClientError::Validation("Debe aceptar los términos y condiciones.".into()));
        }
        Ok(())
    }

    fn into_payload(self) -> SignUpPayload {
        SignUpPayload {
            name: self.name,
            email: self.email,
            password: self.password,
            country: self.country,
        }
    }
}

/// Sessão do painel contra o proxy.
///
/// O token só é lido e escrito através do `TokenStore`; o usuário fica em memória.
pub struct SessionClient<S: TokenStore> {
    http: reqwest::Client,
    base_url: String,
    store: S,
    state: SessionState,
}

impl<S: TokenStore> SessionClient<S> {
    pub fn new(base_url: impl Into<String>, store: S) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, store)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>, store: S) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            store,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn has_role(&self, role: &Role) -> bool {
        rbac::has_role(self.user(), role)
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        rbac::has_permission(self.user(), permission)
    }

    /// Revalida um token salvo. Qualquer falha remota vira logout silencioso;
    /// só erros do armazenamento sobem.
    pub async fn restore(&mut self) -> Result<&SessionState, ClientError> {
        let Some(token) = self.store.load()? else {
            self.state = SessionState::Anonymous;
            return Ok(&self.state);
        };

        self.state = SessionState::Authenticating;
        let verified = match self.request_with(Method::GET, "profile", &token).send().await {
            Ok(response) => read_json::<UserEnvelope>(response).await,
            Err(e) => Err(e.into()),
        };

        match verified {
            Ok(envelope) => {
                tracing::debug!(user_id = %envelope.user.id, "Sessão restaurada");
                self.state = SessionState::Authenticated(envelope.user);
            }
            Err(e) => {
                tracing::info!("Token salvo rejeitado, encerrando sessão: {}", e);
                self.store.clear()?;
                self.state = SessionState::Anonymous;
            }
        }

        Ok(&self.state)
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<&User, ClientError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "El correo electrónico y la contraseña son obligatorios.".into(),
            ));
        }

        self.state = SessionState::Authenticating;
        let payload = SignInPayload { email: email.to_string(), password: password.to_string() };
        let session = match self.post_json::<_, SignInResponse>("signin", &payload).await {
            Ok(session) => session,
            Err(e) => {
                self.state = SessionState::Anonymous;
                return Err(e);
            }
        };

        if let Err(e) = self.store.save(&session.token) {
            self.state = SessionState::Anonymous;
            return Err(e);
        }
        self.state = SessionState::Authenticated(session.user);

        match &self.state {
            SessionState::Authenticated(user) => Ok(user),
            _ => Err(ClientError::NotAuthenticated),
        }
    }

    /// Cadastro não abre sessão; o painel segue para o login.
    pub async fn sign_up(&self, form: SignUpForm) -> Result<User, ClientError> {
        form.check()?;

        let envelope: UserEnvelope = self.post_json("signup", &form.into_payload()).await?;
        Ok(envelope.user)
    }

    /// Avisa o proxy quando há token e limpa a sessão local em qualquer caso.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        if let Some(token) = self.store.load()? {
            let remote = match self.request_with(Method::POST, "logout", &token).send().await {
                Ok(response) => read_json::<MessageEnvelope>(response).await.map(|_| ()),
                Err(e) => Err(e.into()),
            };
            if let Err(e) = remote {
                tracing::warn!("Logout remoto falhou, limpando sessão local: {}", e);
            }
        }

        self.store.clear()?;
        self.state = SessionState::Anonymous;
        Ok(())
    }

    /// Requisição ao proxy já com o `Authorization: Bearer` da sessão.
    pub fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.store.load()?.ok_or(ClientError::NotAuthenticated)?;
        Ok(self.request_with(method, path, &token))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        read_json(response).await
    }

    fn request_with(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.http.request(method, self.url(path)).bearer_auth(token)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// Respostas de erro do proxy seguem {success:false, message}
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .and_then(|body| backend_message(&body))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Error").to_string());
        return Err(ClientError::Rejected { status, message });
    }

    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::token_store::MemoryTokenStore;

    // Porta 9 (discard): nenhuma chamada deve chegar a ser feita
    fn offline_client() -> SessionClient<MemoryTokenStore> {
        SessionClient::new("http://127.0.0.1:9/", MemoryTokenStore::new())
    }

    #[test]
    fn sign_up_form_checks_run_in_order() {
        let mut form = SignUpForm {
            name: "Ana".into(),
            email: "ana@empresa.com".into(),
            password: "secreta".into(),
            confirm_password: "outra".into(),
            country: "España".into(),
            accept_terms: true,
        };
        assert!(matches!(form.check(), Err(ClientError::Validation(m)) if m.contains("coinciden")));

        form.confirm_password = "secreta".into();
        form.accept_terms = false;
        assert!(matches!(form.check(), Err(ClientError::Validation(m)) if m.contains("términos")));

        form.accept_terms = true;
        assert!(form.check().is_ok());

        form.country = "  ".into();
        assert!(matches!(form.check(), Err(ClientError::Validation(m)) if m.contains("obligatorios")));
    }

    #[tokio::test]
    async fn sign_in_with_blank_fields_never_leaves_anonymous() {
        let mut client = offline_client();
        let err = client.sign_in("", "x").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(client.state(), &SessionState::Anonymous);
    }

    #[test]
    fn authorized_requires_a_stored_token() {
        let client = offline_client();
        assert!(matches!(
            client.authorized(Method::GET, "customers"),
            Err(ClientError::NotAuthenticated)
        ));

        client.store().save("tok").unwrap();
        let request = client.authorized(Method::GET, "/customers").unwrap().build().unwrap();
        assert_eq!(request.url().as_str(), "http://127.0.0.1:9/customers");
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer tok"
        );
    }

    #[tokio::test]
    async fn restore_without_token_is_anonymous() {
        let mut client = offline_client();
        assert_eq!(client.restore().await.unwrap(), &SessionState::Anonymous);
        assert!(!client.has_permission(Permission::ViewDashboard));
    }
}
