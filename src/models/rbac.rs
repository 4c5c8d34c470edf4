// src/models/rbac.rs

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::auth::User;

// Cargo do usuário. "client" só aparece nos dados de exemplo do painel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Moderator,
    #[default]
    User,
    Client,
    Unknown(String),
}

impl Role {
    /// Cargos que podem ser atribuídos pela tela de administração.
    pub const ASSIGNABLE: [Role; 3] = [Role::Admin, Role::User, Role::Moderator];

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::User => "user",
            Role::Client => "client",
            Role::Unknown(other) => other,
        }
    }

    pub fn is_assignable(&self) -> bool {
        Self::ASSIGNABLE.contains(self)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "admin" => Role::Admin,
            "moderator" => Role::Moderator,
            "user" | "" => Role::User,
            "client" => Role::Client,
            _ => Role::Unknown(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageUsers,
    ManageRoles,
    ViewDashboard,
    ManageCustomers,
    ManageSales,
    ManageServices,
}

impl Permission {
    pub const ALL: [Permission; 6] = [
        Permission::ManageUsers,
        Permission::ManageRoles,
        Permission::ViewDashboard,
        Permission::ManageCustomers,
        Permission::ManageSales,
        Permission::ManageServices,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Permission::ManageUsers => "manage_users",
            Permission::ManageRoles => "manage_roles",
            Permission::ViewDashboard => "view_dashboard",
            Permission::ManageCustomers => "manage_customers",
            Permission::ManageSales => "manage_sales",
            Permission::ManageServices => "manage_services",
        }
    }

    /// Rótulo exibido na matriz de permissões do painel.
    pub fn label(self) -> &'static str {
        match self {
            Permission::ManageUsers => "Gestionar Usuarios",
            Permission::ManageRoles => "Gestionar Roles",
            Permission::ViewDashboard => "Ver Dashboard",
            Permission::ManageCustomers => "Gestionar Clientes",
            Permission::ManageSales => "Gestionar Ventas",
            Permission::ManageServices => "Gestionar Servicios",
        }
    }
}

const USER_PERMISSIONS: &[Permission] = &[Permission::ViewDashboard];

const MODERATOR_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ManageCustomers,
    Permission::ManageSales,
    Permission::ManageServices,
];

/// Tabela fixa cargo -> permissões. Só orienta a interface; quem decide é o backend.
pub fn permissions_for(role: &Role) -> BTreeSet<Permission> {
    let granted: &[Permission] = match role {
        Role::Admin => &Permission::ALL,
        Role::Moderator => MODERATOR_PERMISSIONS,
        Role::User => USER_PERMISSIONS,
        Role::Client | Role::Unknown(_) => &[],
    };
    granted.iter().copied().collect()
}

pub fn has_permission(user: Option<&User>, permission: Permission) -> bool {
    user.is_some_and(|u| permissions_for(&u.role).contains(&permission))
}

pub fn has_role(user: Option<&User>, role: &Role) -> bool {
    user.is_some_and(|u| &u.role == role)
}

// Linha da matriz cargo x permissões
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RolePermissions {
    #[schema(example = "moderator")]
    pub role: String,
    pub permissions: Vec<Permission>,
    pub labels: Vec<String>,
}

impl RolePermissions {
    pub fn for_role(role: &Role) -> Self {
        let permissions: Vec<Permission> = permissions_for(role).into_iter().collect();
        let labels = permissions.iter().map(|p| p.label().to_string()).collect();
        Self {
            role: role.to_string(),
            permissions,
            labels,
        }
    }
}
