// src/middleware/json.rs

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::{common::error::ApiError, middleware::i18n::Locale};

/// `Json<T>` cuja rejeição sai no envelope de erro, no idioma do Accept-Language.
#[derive(Debug, Clone)]
pub struct LocalizedJson<T>(pub T);

impl<S, T> FromRequest<S> for LocalizedJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_headers(req.headers());
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(LocalizedJson(value)),
            Err(rejection) => Err(ApiError::json_rejection(rejection, &locale)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, StatusCode},
    };
    use serde_json::Value;

    use crate::common::i18n::{translate, Lang, MessageKey};

    fn malformed(lang_header: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder()
            .method("POST")
            .uri("/customers")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(lang) = lang_header {
            builder = builder.header(header::ACCEPT_LANGUAGE, lang);
        }
        builder.body(Body::from("{ not json")).unwrap()
    }

    #[tokio::test]
    async fn malformed_body_follows_accept_language() {
        let err = LocalizedJson::<Value>::from_request(malformed(Some("en-GB")), &())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, translate(Lang::En, MessageKey::InvalidPayload));
        assert!(err.details.is_some());
    }

    #[tokio::test]
    async fn malformed_body_defaults_to_spanish() {
        let err = LocalizedJson::<Value>::from_request(malformed(None), &())
            .await
            .unwrap_err();

        assert_eq!(err.message, translate(Lang::Es, MessageKey::InvalidPayload));
    }
}
