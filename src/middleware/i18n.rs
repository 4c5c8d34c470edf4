// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::common::i18n::Lang;

// Extrator de idioma, lido do Accept-Language
#[derive(Debug, Clone, Copy, Default)]
pub struct Locale(pub Lang);

impl Locale {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                // Percorre a lista em ordem de preferência até achar um idioma suportado
                accept_language::parse(header_str).iter().find_map(|tag| {
                    // "pt-BR" -> "pt"
                    let primary = tag.split('-').next().unwrap_or(tag);
                    Lang::from_tag(primary)
                })
            })
            .unwrap_or_default();

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}
