// src/models/resource.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coleções que o proxy repassa ao backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Users,
    Customers,
    Sales,
    Services,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Users,
        Resource::Customers,
        Resource::Sales,
        Resource::Services,
    ];

    pub fn segment(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Customers => "customers",
            Resource::Sales => "sales",
            Resource::Services => "services",
        }
    }

    pub fn collection_path(self) -> String {
        self.segment().to_string()
    }

    pub fn item_path(self, id: &str) -> String {
        self.nested_path(&[id])
    }

    /// `services/customer/{id}`, `users/{id}/role` etc.
    /// Cada parte vira um único segmento: `/`, `?`, `#` e `%` saem codificados.
    pub fn nested_path(self, parts: &[&str]) -> String {
        let mut path = self.collection_path();
        for part in parts {
            path.push('/');
            path.push_str(&urlencoding::encode(part));
        }
        path
    }
}

/// IDs que o backend nunca deve receber como segmento: vazio, `.` e `..`.
pub fn is_valid_id(id: &str) -> bool {
    !matches!(id.trim(), "" | "." | "..")
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

// Estado de um serviço
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    /// Aceita tanto "in_progress" quanto "in progress" (o painel usa os dois).
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "pending" => Some(ServiceStatus::Pending),
            "in_progress" => Some(ServiceStatus::InProgress),
            "completed" => Some(ServiceStatus::Completed),
            "cancelled" | "canceled" => Some(ServiceStatus::Cancelled),
            _ => None,
        }
    }
}
