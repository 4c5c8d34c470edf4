// src/config.rs

use std::env;

use anyhow::Context;

use crate::services::{AuthService, BackendClient, DashboardService, ResourceService};

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub base_url: String,
    /// Token fixo usado pela rota legada `/legacy/users`.
    pub api_token_crud: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT inválida: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let base_url = lookup("BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .context("BASE_URL deve ser definida")?;

        let api_token_crud = lookup("API_TOKEN_CRUD").filter(|t| !t.trim().is_empty());

        Ok(Self { port, base_url, api_token_crud })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub backend: BackendClient,
    pub auth_service: AuthService,
    pub resource_service: ResourceService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // --- Monta o gráfico de dependências ---
        let backend = BackendClient::new(&config.base_url, config.api_token_crud.clone())
            .context("Falha ao criar o cliente HTTP do backend")?;
        let auth_service = AuthService::new(backend.clone());
        let resource_service = ResourceService::new(backend.clone());
        let dashboard_service = DashboardService::new(resource_service.clone());

        tracing::info!("✅ Backend externo configurado em {}", backend.base_url());

        Ok(Self {
            config,
            backend,
            auth_service,
            resource_service,
            dashboard_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn port_defaults_to_5000() {
        let config = Config::from_lookup(lookup_from(&[("BASE_URL", "http://flow-backend.test/api/")])).unwrap();
        assert_eq!(config.port, 5000);
        assert!(config.api_token_crud.is_none());
    }

    #[test]
    fn base_url_is_required() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "8080")])).is_err());
    }

    #[test]
    fn rejects_non_numeric_port() {
        let result = Config::from_lookup(lookup_from(&[("BASE_URL", "http://x/"), ("PORT", "abc")]));
        assert!(result.is_err());
    }
}
