#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use maeve::server::config::configure_app;
use maeve::server::configuration::{ClementineSettings, KeycloakSettings, Settings};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MAX_BODY_SIZE: usize = 1024 * 1024;

pub const TEST_REALM: &str = "abotkit";
pub const TEST_CLIENT: &str = "maeve";

pub async fn test_pool() -> SqlitePool {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn spawn_app(settings: Settings) -> Router {
    configure_app(test_pool().await, &settings)
}

/// Settings with identity verification turned off: the gate allows
/// everything.
pub fn open_settings() -> Settings {
    Settings::default()
}

pub fn keycloak_settings(server: &MockServer) -> KeycloakSettings {
    let addr = server.address();
    KeycloakSettings {
        enabled: true,
        host: format!("http://{}", addr.ip()),
        port: addr.port(),
        realm: TEST_REALM.to_string(),
        client_id: TEST_CLIENT.to_string(),
    }
}

pub fn clementine_settings(server: &MockServer) -> ClementineSettings {
    let addr = server.address();
    ClementineSettings {
        host: format!("http://{}", addr.ip()),
        port: addr.port(),
    }
}

/// Mounts a userinfo endpoint that accepts any bearer credential.
pub async fn mock_userinfo(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/auth/realms/{TEST_REALM}/protocol/openid-connect/userinfo"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "test-subject",
            "preferred_username": "dolores"
        })))
        .mount(server)
        .await;
}

/// An unsigned test token; verification happens against the mocked userinfo
/// endpoint, the signature is never checked locally.
pub fn bearer_token(roles: &[&str]) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(
        json!({ "resource_access": { TEST_CLIENT: { "roles": roles } } }).to_string(),
    );
    format!("{header}.{claims}.signature")
}

pub async fn send(app: &Router, method: &str, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn send_json_as(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Value,
) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn send_as(app: &Router, method: &str, uri: &str, token: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), MAX_BODY_SIZE).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a bot whose location points at the given mock server.
pub async fn register_bot(app: &Router, name: &str, server: &MockServer) {
    let addr = server.address();
    let response = send_json(
        app,
        "POST",
        "/bot",
        json!({
            "name": name,
            "host": format!("http://{}", addr.ip()),
            "port": addr.port(),
            "type": "robert"
        }),
    )
    .await;
    assert_eq!(response.status(), 200);
}
