// src/routes.rs

use axum::{
    http::{header, HeaderValue},
    middleware as axum_middleware,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::{auth::auth_guard, request_id::request_id},
    models::resource::Resource,
};

/// CRUD de um recurso; o `Resource` vai como extension para os handlers genéricos.
pub fn resource_router(resource: Resource) -> Router<AppState> {
    let mut router = Router::new()
        .route(
            "/",
            get(handlers::resources::list).post(handlers::resources::create),
        )
        .route(
            "/{id}",
            get(handlers::resources::show)
                .put(handlers::resources::update)
                .delete(handlers::resources::destroy),
        );

    router = match resource {
        Resource::Users => router.route("/{id}/role", patch(handlers::resources::update_user_role)),
        Resource::Services => router
            .route("/customer/{customer_id}", get(handlers::resources::services_by_customer))
            .route("/sale/{sale_id}", get(handlers::resources::services_by_sale)),
        Resource::Customers | Resource::Sales => router,
    };

    router.layer(Extension(resource))
}

pub fn app(app_state: AppState) -> Router {
    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/signin", post(handlers::auth::sign_in))
        .route("/signup", post(handlers::auth::sign_up));

    // Todo o resto exige Authorization: Bearer
    let mut protected_routes = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/profile", get(handlers::auth::profile))
        .route("/roles", get(handlers::rbac::list_roles))
        .route("/roles/{role}/permissions", get(handlers::rbac::role_permissions))
        .route("/dashboard/summary", get(handlers::dashboard::get_summary));

    for resource in Resource::ALL {
        protected_routes = protected_routes.nest(&format!("/{}", resource.segment()), resource_router(resource));
    }

    let protected_routes = protected_routes.route_layer(axum_middleware::from_fn(auth_guard));

    let mut app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(auth_routes)
        .merge(protected_routes);

    // A variante sem token só existe quando há um token de serviço configurado
    if app_state.backend.has_service_token() {
        app = app.route("/legacy/users", get(handlers::resources::legacy_list_users));
    }

    app.layer(axum_middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .with_state(app_state)
}
