// src/client/error.rs

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Falhou a checagem local, nada foi enviado.
    #[error("{0}")]
    Validation(String),

    /// O proxy respondeu com erro; `message` é a do backend quando existe.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Falha de comunicação com o proxy: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Falha ao acessar o armazenamento do token: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Resposta em formato inesperado: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Sessão não autenticada")]
    NotAuthenticated,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            ClientError::NotAuthenticated => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }
}
