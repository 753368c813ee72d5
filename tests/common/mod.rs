#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use jobboard::jobboard_cache::InMemoryRevocationStore;
use jobboard::jobboard_config::{CorsConfig, EmailConfig, JwtConfig};
use jobboard::jobboard_db::InMemoryStore;
use jobboard::router::init_router;
use jobboard::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "longenough1";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        algorithm: "HS256".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 172800,
        verification_token_expiry: 86400,
        reset_token_expiry: 3600,
    }
}

pub fn setup_test_app() -> (Router, AppState) {
    let state = AppState::new(
        InMemoryStore::new(),
        Arc::new(InMemoryRevocationStore::default()),
        test_jwt_config(),
        EmailConfig::disabled(),
        CorsConfig::default(),
    )
    .unwrap();

    (init_router(state.clone()), state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn signup_body(email: &str, role: &str) -> Value {
    json!({
        "username": "tester",
        "email": email,
        "first_name": "Test",
        "last_name": "User",
        "password": PASSWORD,
        "phone_number": "+2348000000000",
        "gender": "female",
        "role": role
    })
}

pub async fn signup(app: &Router, email: &str, role: &str) -> Value {
    let (status, body) = send(
        app,
        json_request("POST", "/api/v1/auth/signup", None, signup_body(email, role)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    body
}

pub struct Session {
    pub uid: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn login(app: &Router, email: &str) -> Session {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": email, "password": PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED, "login failed: {body}");

    Session {
        uid: body["user"]["user_uid"].as_str().unwrap().to_string(),
        email: body["user"]["email"].as_str().unwrap().to_string(),
        access_token: body["access_token"].as_str().unwrap().to_string(),
        refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
    }
}

/// Signs up, marks the account verified and logs in.
pub async fn verified_session(app: &Router, state: &AppState, role: &str) -> Session {
    let email = generate_unique_email();
    signup(app, &email, role).await;
    assert!(state.users.mark_verified(&email).await.unwrap());
    login(app, &email).await
}

pub async fn create_job(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/v1/jobs",
            Some(token),
            json!({
                "title": title,
                "description": "Build and run the matching service",
                "location": "Lagos",
                "salary": "120k",
                "is_active": true
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "job creation failed: {body}");
    body
}
