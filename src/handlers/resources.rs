// src/handlers/resources.rs

// Handlers genéricos: o mesmo código atende users, customers, sales e services.
// O recurso chega pela extension instalada em `routes::resource_router`.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension,
};
use serde_json::Value;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedCaller, i18n::Locale, json::LocalizedJson, request_id::RequestId},
    models::{auth::RoleUpdatePayload, rbac::Role, resource::Resource},
    services::{
        backend::{Auth, BackendReply},
        resource_service::ResourceAction,
    },
};

async fn relay(
    app_state: &AppState,
    locale: &Locale,
    resource: Resource,
    action: ResourceAction,
    caller: &AuthenticatedCaller,
) -> Result<BackendReply, ApiError> {
    app_state
        .resource_service
        .relay(resource, action, Auth::Bearer(&caller.token), caller.request_id.as_deref())
        .await
        .map_err(|e| e.to_api_error(locale))
}

// GET /{resource}
#[utoipa::path(
    get,
    path = "/{resource}",
    tag = "Resources",
    params(("resource" = Resource, Path, description = "users | customers | sales | services")),
    responses(
        (status = 200, description = "Lista repassada do backend sem alterações", body = Vec<Object>),
        (status = 401, description = "Token ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    Extension(resource): Extension<Resource>,
    locale: Locale,
    caller: AuthenticatedCaller,
) -> Result<impl IntoResponse, ApiError> {
    relay(&app_state, &locale, resource, ResourceAction::List, &caller).await
}

// GET /{resource}/{id}
#[utoipa::path(
    get,
    path = "/{resource}/{id}",
    tag = "Resources",
    params(
        ("resource" = Resource, Path, description = "users | customers | sales | services"),
        ("id" = String, Path, description = "ID do registro")
    ),
    responses(
        (status = 200, description = "Registro repassado do backend", body = Object),
        (status = 404, description = "Não encontrado no backend")
    ),
    security(("api_jwt" = []))
)]
pub async fn show(
    State(app_state): State<AppState>,
    Extension(resource): Extension<Resource>,
    locale: Locale,
    caller: AuthenticatedCaller,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    relay(&app_state, &locale, resource, ResourceAction::Show(id), &caller).await
}

// POST /{resource}
#[utoipa::path(
    post,
    path = "/{resource}",
    tag = "Resources",
    params(("resource" = Resource, Path, description = "users | customers | sales | services")),
    request_body = Object,
    responses(
        (status = 201, description = "Registro criado no backend", body = Object),
        (status = 400, description = "Corpo inválido"),
        (status = 422, description = "Validação do backend")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    Extension(resource): Extension<Resource>,
    locale: Locale,
    caller: AuthenticatedCaller,
    LocalizedJson(body): LocalizedJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
    relay(&app_state, &locale, resource, ResourceAction::Create(body), &caller).await
}

// PUT /{resource}/{id}
#[utoipa::path(
    put,
    path = "/{resource}/{id}",
    tag = "Resources",
    params(
        ("resource" = Resource, Path, description = "users | customers | sales | services"),
        ("id" = String, Path, description = "ID do registro")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Registro atualizado no backend", body = Object),
        (status = 400, description = "Corpo inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    Extension(resource): Extension<Resource>,
    locale: Locale,
    caller: AuthenticatedCaller,
    Path(id): Path<String>,
    LocalizedJson(body): LocalizedJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
    relay(&app_state, &locale, resource, ResourceAction::Update(id, body), &caller).await
}

// DELETE /{resource}/{id}
#[utoipa::path(
    delete,
    path = "/{resource}/{id}",
    tag = "Resources",
    params(
        ("resource" = Resource, Path, description = "users | customers | sales | services"),
        ("id" = String, Path, description = "ID do registro")
    ),
    responses(
        (status = 200, description = "Registro removido"),
        (status = 204, description = "Registro removido, sem corpo"),
        (status = 404, description = "Já não existe no backend")
    ),
    security(("api_jwt" = []))
)]
pub async fn destroy(
    State(app_state): State<AppState>,
    Extension(resource): Extension<Resource>,
    locale: Locale,
    caller: AuthenticatedCaller,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    relay(&app_state, &locale, resource, ResourceAction::Delete(id), &caller).await
}

// PATCH /users/{id}/role
#[utoipa::path(
    patch,
    path = "/users/{id}/role",
    tag = "Resources",
    params(("id" = String, Path, description = "ID do usuário")),
    request_body = RoleUpdatePayload,
    responses(
        (status = 200, description = "Cargo atualizado no backend", body = Object),
        (status = 400, description = "Cargo desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user_role(
    State(app_state): State<AppState>,
    locale: Locale,
    caller: AuthenticatedCaller,
    Path(id): Path<String>,
    LocalizedJson(payload): LocalizedJson<RoleUpdatePayload>,
) -> Result<impl IntoResponse, ApiError> {
    // Só cargos atribuíveis chegam ao backend
    let role = Role::from(payload.role);
    if !role.is_assignable() {
        return Err(AppError::UnknownRole(role.to_string()).to_api_error(&locale));
    }

    relay(&app_state, &locale, Resource::Users, ResourceAction::UpdateRole(id, role), &caller).await
}

// GET /services/customer/{customer_id}
#[utoipa::path(
    get,
    path = "/services/customer/{customer_id}",
    tag = "Resources",
    params(("customer_id" = String, Path, description = "ID do cliente")),
    responses((status = 200, description = "Serviços do cliente", body = Vec<Object>)),
    security(("api_jwt" = []))
)]
pub async fn services_by_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    caller: AuthenticatedCaller,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let action = ResourceAction::ListBy("customer", customer_id);
    relay(&app_state, &locale, Resource::Services, action, &caller).await
}

// GET /services/sale/{sale_id}
#[utoipa::path(
    get,
    path = "/services/sale/{sale_id}",
    tag = "Resources",
    params(("sale_id" = String, Path, description = "ID da venda")),
    responses((status = 200, description = "Serviços da venda", body = Vec<Object>)),
    security(("api_jwt" = []))
)]
pub async fn services_by_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    caller: AuthenticatedCaller,
    Path(sale_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let action = ResourceAction::ListBy("sale", sale_id);
    relay(&app_state, &locale, Resource::Services, action, &caller).await
}

// GET /legacy/users
// Variante antiga da listagem de usuários, chamada sem token pelo painel.
// Autentica no backend com o token fixo API_TOKEN_CRUD.
#[utoipa::path(
    get,
    path = "/legacy/users",
    tag = "Resources",
    responses((status = 200, description = "Usuários, via token de serviço", body = Vec<Object>))
)]
pub async fn legacy_list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    request_id: RequestId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .resource_service
        .relay(Resource::Users, ResourceAction::List, Auth::Static, Some(&request_id.0))
        .await
        .map_err(|e| e.to_api_error(&locale))
}
