// src/handlers/rbac.rs

use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
    models::rbac::{Role, RolePermissions},
};

// GET /roles (matriz cargo x permissões da tela de administração)
#[utoipa::path(
    get,
    path = "/roles",
    tag = "RBAC",
    responses(
        (status = 200, description = "Permissões de cada cargo atribuível", body = Vec<RolePermissions>),
        (status = 401, description = "Token ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_roles() -> impl IntoResponse {
    let matrix: Vec<RolePermissions> = Role::ASSIGNABLE.iter().map(RolePermissions::for_role).collect();
    (StatusCode::OK, Json(matrix))
}

// GET /roles/{role}/permissions
#[utoipa::path(
    get,
    path = "/roles/{role}/permissions",
    tag = "RBAC",
    params(("role" = String, Path, description = "admin | moderator | user | client")),
    responses(
        (status = 200, description = "Permissões do cargo", body = RolePermissions),
        (status = 404, description = "Cargo desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn role_permissions(
    locale: Locale,
    Path(role): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let role = Role::from(role);

    if let Role::Unknown(name) = &role {
        let mut error = AppError::UnknownRole(name.clone()).to_api_error(&locale);
        error.status = StatusCode::NOT_FOUND;
        return Err(error);
    }

    Ok(Json(RolePermissions::for_role(&role)))
}
