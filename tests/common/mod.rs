// tests/common/mod.rs

// Backend falso com estado mínimo (usuários e serviços) para os testes de ponta a ponta.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    body::{to_bytes, Body},
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use flow_proxy::config::{AppState, Config};

pub const SERVICE_TOKEN: &str = "svc-token";

// Usuário antigo do backend: cargo null e data sem "T"
pub const LEGACY_EMAIL: &str = "legado@empresa.com";
pub const LEGACY_PASSWORD: &str = "antigua";

#[derive(Default)]
pub struct MockBackend {
    hits: AtomicUsize,
    users: Mutex<Vec<(Value, String)>>,
    services: Mutex<Vec<Value>>,
    request_ids: Mutex<Vec<String>>,
    paths: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn request_ids(&self) -> Vec<String> {
        self.request_ids.lock().unwrap().clone()
    }

    /// Caminhos como chegaram ao backend, ainda codificados.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

pub struct Harness {
    pub backend: Arc<MockBackend>,
    pub base_url: String,
}

/// Sobe o backend falso numa porta efêmera.
pub async fn spawn_backend() -> Harness {
    let backend = Arc::new(MockBackend::default());
    *backend.services.lock().unwrap() = vec![
        json!({ "service_id": 1, "name": "Revisión", "status": "pending", "customer_id": 1, "sale_id": 1, "created_at": "2024-05-02T09:00:00Z" }),
        json!({ "service_id": 2, "name": "Instalación", "state": "in progress", "customer_id": 2, "sale_id": 1, "created_at": "2024-05-03T09:00:00Z" }),
        json!({ "service_id": 3, "name": "Mantenimiento", "status": "completed", "customer_id": 1, "sale_id": 2 }),
    ];
    backend.users.lock().unwrap().push((
        json!({
            "id": 100,
            "name": "Legado",
            "email": LEGACY_EMAIL,
            "role": null,
            "created_at": "2024-03-01 10:00:00",
        }),
        LEGACY_PASSWORD.to_string(),
    ));

    let router = Router::new()
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/logout", post(|| async { Json(json!({ "message": "Sesión cerrada" })) }))
        .route("/api/profile", get(profile))
        .route("/api/users", get(users))
        .route("/api/users/{id}/role", patch(update_role))
        .route(
            "/api/customers",
            get(|| async { Json(json!([{ "customer_id": 1, "name": "Acme" }])) }).post(create_customer),
        )
        .route("/api/customers/{id}", get(show_customer).delete(|| async { StatusCode::NO_CONTENT }))
        .route("/api/sales", get(sales))
        .route("/api/sales/{id}", put(update_sale))
        .route("/api/services", get(services))
        .route("/api/services/{id}", get(show_service).delete(delete_service))
        .route("/api/services/customer/{id}", get(services_by_customer))
        .route("/api/services/sale/{id}", get(services_by_sale))
        .layer(middleware::from_fn_with_state(backend.clone(), count_hits))
        .with_state(backend.clone());

    let addr = serve(router).await;
    Harness { backend, base_url: format!("http://{addr}/api/") }
}

pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn proxy(base_url: &str, service_token: Option<&str>) -> Router {
    let config = Config {
        port: 0,
        base_url: base_url.to_string(),
        api_token_crud: service_token.map(str::to_string),
    };
    flow_proxy::routes::app(AppState::new(config).unwrap())
}

pub async fn call(app: &Router, request: Request) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request {
    let mut builder = axum::http::Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

// --- Handlers do backend falso ---

async fn count_hits(State(backend): State<Arc<MockBackend>>, request: Request, next: Next) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    backend.paths.lock().unwrap().push(request.uri().path().to_string());
    if let Some(id) = request.headers().get("x-request-id").and_then(|v| v.to_str().ok()) {
        backend.request_ids.lock().unwrap().push(id.to_string());
    }
    next.run(request).await
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
}

async fn register(State(backend): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Response {
    let mut users = backend.users.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default();
    if users.iter().any(|(u, _)| u["email"] == email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "El correo ya existe", "errors": { "email": ["taken"] } })),
        )
            .into_response();
    }

    let user = json!({
        "id": users.iter().filter(|(u, _)| u["id"] != 100).count() + 1,
        "name": body["name"],
        "email": email,
        "role": "user",
    });
    users.push((user.clone(), body["password"].as_str().unwrap_or_default().to_string()));

    (StatusCode::CREATED, Json(json!({ "message": "Usuario registrado", "user": user }))).into_response()
}

async fn login(State(backend): State<Arc<MockBackend>>, Json(body): Json<Value>) -> Response {
    let users = backend.users.lock().unwrap();
    let found = users
        .iter()
        .find(|(u, password)| u["email"] == body["email"] && body["password"] == password.as_str());

    match found {
        Some((user, _)) => Json(json!({
            "message": "Bienvenido",
            "token": format!("tok-{}", user["id"]),
            "user": user,
        }))
        .into_response(),
        None => unauthorized("Credenciales inválidas"),
    }
}

async fn profile(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    let users = backend.users.lock().unwrap();
    let user = bearer(&headers)
        .and_then(|t| t.strip_prefix("tok-"))
        .and_then(|id| users.iter().find(|(u, _)| u["id"].to_string() == id));

    match user {
        Some((user, _)) => Json(json!({ "user": user })).into_response(),
        None => unauthorized("Token inválido"),
    }
}

async fn users(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some(t) if t == SERVICE_TOKEN || t.starts_with("tok-") => {
            Json(json!([{ "id": 1, "name": "Ana", "email": "ana@empresa.com", "role": "admin" }])).into_response()
        }
        _ => unauthorized("Token inválido"),
    }
}

async fn update_role(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "id": id, "role": body["role"] }))
}

async fn sales() -> Json<Value> {
    Json(json!({
        "sales": [
            { "sale_id": 1, "price": "100.50", "created_at": "2024-03-05T10:00:00Z" },
            { "sale_id": 2, "price": 49.5, "creationDate": "2024-07-01 12:00:00" },
        ]
    }))
}

async fn services(State(backend): State<Arc<MockBackend>>) -> Json<Value> {
    Json(Value::Array(backend.services.lock().unwrap().clone()))
}

async fn show_service(State(backend): State<Arc<MockBackend>>, Path(id): Path<i64>) -> Response {
    let services = backend.services.lock().unwrap();
    match services.iter().find(|s| s["service_id"] == id) {
        Some(service) => Json(service.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Servicio no encontrado" }))).into_response(),
    }
}

async fn delete_service(State(backend): State<Arc<MockBackend>>, Path(id): Path<i64>) -> Response {
    let mut services = backend.services.lock().unwrap();
    let before = services.len();
    services.retain(|s| s["service_id"] != id);

    if services.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Servicio no encontrado" }))).into_response();
    }
    Json(json!({ "message": "Servicio eliminado" })).into_response()
}

async fn create_customer(Json(mut body): Json<Value>) -> Response {
    body["customer_id"] = json!(2);
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn show_customer(Path(id): Path<String>) -> Response {
    if id == "1" {
        return Json(json!({ "customer_id": 1, "name": "Acme" })).into_response();
    }
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Cliente no encontrado" }))).into_response()
}

async fn update_sale(Path(id): Path<i64>, Json(mut body): Json<Value>) -> Json<Value> {
    body["sale_id"] = json!(id);
    Json(body)
}

fn services_where(backend: &MockBackend, headers: &HeaderMap, key: &str, id: i64) -> Response {
    if bearer(headers).is_none() {
        return unauthorized("Token requerido");
    }
    let services = backend.services.lock().unwrap();
    let matching: Vec<Value> = services.iter().filter(|s| s[key] == id).cloned().collect();
    Json(Value::Array(matching)).into_response()
}

async fn services_by_customer(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    services_where(&backend, &headers, "customer_id", id)
}

async fn services_by_sale(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    services_where(&backend, &headers, "sale_id", id)
}
