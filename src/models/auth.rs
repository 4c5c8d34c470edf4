// src/models/auth.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::dates, models::rbac::Role};

// IDs do backend chegam como número ou como string, dependendo do recurso
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

// Usuário como o backend o devolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(value_type = String, example = "1")]
    pub id: RecordId,

    #[schema(example = "Ana Puig")]
    pub name: String,

    #[schema(example = "ana@empresa.com")]
    pub email: String,

    // Sem cargo (ausente ou null) o painel trata o usuário como "user"
    #[serde(default, deserialize_with = "role_or_default")]
    #[schema(value_type = String, example = "admin")]
    pub role: Role,

    #[serde(default, deserialize_with = "dates::deserialize_lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

fn role_or_default<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(Role::from)
        .unwrap_or_default())
}

// Dados para login
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignInPayload {
    #[validate(email(message = "El correo electrónico no es válido."))]
    #[schema(example = "a@b.com")]
    pub email: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria."))]
    pub password: String,
}

// Dados para registro de um novo usuário
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignUpPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    #[schema(example = "Ana Puig")]
    pub name: String,
    #[validate(email(message = "El correo electrónico no es válido."))]
    pub email: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria."))]
    pub password: String,
    #[validate(length(min = 1, message = "El país es obligatorio."))]
    #[schema(example = "España")]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleUpdatePayload {
    #[schema(example = "moderator")]
    pub role: String,
}

// --- Envelopes devolvidos pelo proxy ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignInResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
    pub token: String,
}

/// Usado por `/signup` e `/profile`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub success: bool,
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

// --- Contratos das respostas do backend ---

#[derive(Debug, Deserialize)]
pub struct BackendSignIn {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

// `/register` e `/profile` devolvem `{user: ...}` ou o usuário direto
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BackendUserReply {
    Wrapped {
        user: User,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(User),
}

impl BackendUserReply {
    pub fn into_parts(self) -> (User, Option<String>) {
        match self {
            BackendUserReply::Wrapped { user, message } => (user, message),
            BackendUserReply::Bare(user) => (user, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_without_role_defaults_to_user() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "name": "Ana",
            "email": "ana@empresa.com",
            "created_at": "2024-03-01T10:00:00.000000Z"
        }))
        .unwrap();

        assert_eq!(user.id, RecordId::Number(7));
        assert_eq!(user.role, Role::User);
        assert!(user.created_at.is_some());
    }

    #[test]
    fn null_role_and_spaced_timestamp_still_decode() {
        let user: User = serde_json::from_value(json!({
            "id": 3,
            "name": "Ana",
            "email": "ana@empresa.com",
            "role": null,
            "created_at": "2024-03-01 10:00:00"
        }))
        .unwrap();

        assert_eq!(user.role, Role::User);
        assert_eq!(user.created_at, crate::common::dates::parse_timestamp("2024-03-01T10:00:00Z"));
    }

    #[test]
    fn unparseable_created_at_is_dropped() {
        let user: User = serde_json::from_value(json!({
            "id": 3,
            "name": "Ana",
            "email": "ana@empresa.com",
            "role": "admin",
            "created_at": "ayer"
        }))
        .unwrap();

        assert_eq!(user.role, Role::Admin);
        assert!(user.created_at.is_none());
    }

    #[test]
    fn backend_user_reply_accepts_both_shapes() {
        let bare = json!({ "id": "u-1", "name": "Ana", "email": "ana@empresa.com", "role": "admin" });
        let wrapped = json!({ "user": bare.clone(), "message": "ok" });

        let (user, message) = serde_json::from_value::<BackendUserReply>(wrapped).unwrap().into_parts();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(message.as_deref(), Some("ok"));

        let (user, message) = serde_json::from_value::<BackendUserReply>(bare).unwrap().into_parts();
        assert_eq!(user.id.to_string(), "u-1");
        assert!(message.is_none());
    }

    #[test]
    fn sign_in_payload_requires_valid_email() {
        let payload = SignInPayload { email: "not-an-email".into(), password: "x".into() };
        assert!(payload.validate().is_err());
    }
}
