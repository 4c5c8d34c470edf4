// src/services/resource_service.rs

use axum::http::Method;
use serde_json::Value;

use crate::{
    common::{error::AppError, i18n::MessageKey},
    models::{
        rbac::Role,
        resource::{is_valid_id, Resource, ServiceStatus},
    },
    services::backend::{Auth, BackendClient, BackendReply, BackendRequest},
};

/// O que fazer com o recurso. Cada ação vira um verbo + caminho no backend.
#[derive(Debug, Clone)]
pub enum ResourceAction {
    List,
    Show(String),
    Create(Value),
    Update(String, Value),
    Delete(String),
    UpdateRole(String, Role),
    /// `GET <resource>/<parent>/<id>`, ex.: `services/customer/7`.
    ListBy(&'static str, String),
}

impl ResourceAction {
    fn method(&self) -> Method {
        match self {
            ResourceAction::List | ResourceAction::Show(_) | ResourceAction::ListBy(..) => Method::GET,
            ResourceAction::Create(_) => Method::POST,
            ResourceAction::Update(..) => Method::PUT,
            ResourceAction::Delete(_) => Method::DELETE,
            ResourceAction::UpdateRole(..) => Method::PATCH,
        }
    }

    fn fallback(&self) -> MessageKey {
        match self {
            ResourceAction::List | ResourceAction::Show(_) | ResourceAction::ListBy(..) => MessageKey::FetchFailed,
            ResourceAction::Create(_) | ResourceAction::Update(..) => MessageKey::SaveFailed,
            ResourceAction::Delete(_) => MessageKey::DeleteFailed,
            ResourceAction::UpdateRole(..) => MessageKey::RoleUpdateFailed,
        }
    }

    fn path(&self, resource: Resource) -> String {
        match self {
            ResourceAction::List | ResourceAction::Create(_) => resource.collection_path(),
            ResourceAction::Show(id) | ResourceAction::Update(id, _) | ResourceAction::Delete(id) => {
                resource.item_path(id)
            }
            ResourceAction::UpdateRole(id, _) => resource.nested_path(&[id.as_str(), "role"]),
            ResourceAction::ListBy(parent, id) => resource.nested_path(&[*parent, id.as_str()]),
        }
    }

    fn record_id(&self) -> Option<&str> {
        match self {
            ResourceAction::Show(id)
            | ResourceAction::Update(id, _)
            | ResourceAction::Delete(id)
            | ResourceAction::UpdateRole(id, _)
            | ResourceAction::ListBy(_, id) => Some(id.as_str()),
            ResourceAction::List | ResourceAction::Create(_) => None,
        }
    }

    fn into_body(self) -> Option<Value> {
        match self {
            ResourceAction::Create(body) | ResourceAction::Update(_, body) => Some(body),
            ResourceAction::UpdateRole(_, role) => Some(serde_json::json!({ "role": role })),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct ResourceService {
    backend: BackendClient,
}

impl ResourceService {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Relay genérico: um único caminho para todos os recursos e modos de autenticação.
    pub async fn relay(
        &self,
        resource: Resource,
        action: ResourceAction,
        auth: Auth<'_>,
        request_id: Option<&str>,
    ) -> Result<BackendReply, AppError> {
        if let Some(id) = action.record_id().filter(|id| !is_valid_id(id)) {
            return Err(AppError::InvalidPayload(format!("id inválido: {id:?}")));
        }

        if let ResourceAction::Create(body) | ResourceAction::Update(_, body) = &action {
            validate_record_body(resource, body)?;
        }

        let mut request = BackendRequest::new(action.method(), action.path(resource), action.fallback())
            .auth(auth)
            .request_id(request_id);

        if let Some(body) = action.into_body() {
            request = request.json(body);
        }

        self.backend.send(request).await
    }
}

/// Checagem mínima de formato antes de gastar uma chamada ao backend.
pub fn validate_record_body(resource: Resource, body: &Value) -> Result<(), AppError> {
    let Some(record) = body.as_object() else {
        return Err(AppError::InvalidPayload(format!(
            "o corpo de {resource} deve ser um objeto JSON"
        )));
    };

    if resource == Resource::Services {
        if let Some(status) = record.get("status") {
            let valid = status.as_str().and_then(ServiceStatus::parse).is_some();
            if !valid {
                return Err(AppError::InvalidPayload(format!("status de serviço inválido: {status}")));
            }
        }
    }

    Ok(())
}
