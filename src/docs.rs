// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::sign_in,
        handlers::auth::sign_up,
        handlers::auth::logout,
        handlers::auth::profile,

        // --- Recursos (relay genérico) ---
        handlers::resources::list,
        handlers::resources::show,
        handlers::resources::create,
        handlers::resources::update,
        handlers::resources::destroy,
        handlers::resources::update_user_role,
        handlers::resources::services_by_customer,
        handlers::resources::services_by_sale,
        handlers::resources::legacy_list_users,

        // --- RBAC ---
        handlers::rbac::list_roles,
        handlers::rbac::role_permissions,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::SignInPayload,
            models::auth::SignUpPayload,
            models::auth::RoleUpdatePayload,
            models::auth::SignInResponse,
            models::auth::UserEnvelope,
            models::auth::MessageEnvelope,

            // --- RBAC ---
            models::rbac::Permission,
            models::rbac::RolePermissions,

            // --- Recursos ---
            models::resource::Resource,
            models::resource::ServiceStatus,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::ServiceStatusCounts,
            models::dashboard::ActivityEntry,
            models::dashboard::ActivityKind,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login, registro e sessão repassados ao backend"),
        (name = "Resources", description = "CRUD de usuários, clientes, vendas e serviços"),
        (name = "RBAC", description = "Tabela fixa de cargos e permissões"),
        (name = "Dashboard", description = "Agregações do painel")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
