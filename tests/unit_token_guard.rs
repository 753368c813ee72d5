mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Utc;
use common::{authed_request, send, setup_test_app, test_jwt_config, verified_session};
use jobboard::jobboard_auth::{TokenKind, TokenSubject};
use jobboard::jobboard_cache::{CacheError, RevocationStore};
use jobboard::jobboard_config::{CorsConfig, EmailConfig};
use jobboard::jobboard_core::ErrorKind;
use jobboard::jobboard_db::InMemoryStore;
use jobboard::middleware::auth::verify_token;
use jobboard::router::init_router;
use jobboard::state::AppState;

struct UnavailableStore;

fn unavailable() -> CacheError {
    CacheError::Serialization(serde_json::from_str::<u8>("down").unwrap_err())
}

#[async_trait]
impl RevocationStore for UnavailableStore {
    async fn revoke(&self, _jti: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(unavailable())
    }

    async fn is_revoked(&self, _jti: &str) -> Result<bool, CacheError> {
        Err(unavailable())
    }
}

fn subject() -> TokenSubject {
    TokenSubject::new("guard@test.com", uuid::Uuid::new_v4().to_string()).with_role("user")
}

#[tokio::test]
async fn test_guard_accepts_matching_kind() {
    let (_app, state) = setup_test_app();
    let exp = Utc::now() + chrono::Duration::minutes(5);

    let access = state.tokens.issue(&subject(), exp, false).unwrap();
    let claims = verify_token(&state, &access, TokenKind::Access).await.unwrap();
    assert!(!claims.refresh);
    assert!(!claims.jti.is_empty());

    let refresh = state.tokens.issue(&subject(), exp, true).unwrap();
    let claims = verify_token(&state, &refresh, TokenKind::Refresh).await.unwrap();
    assert!(claims.refresh);
}

#[tokio::test]
async fn test_guard_rejects_revoked_jti() {
    let (_app, state) = setup_test_app();
    let token = state
        .tokens
        .issue(&subject(), Utc::now() + chrono::Duration::minutes(5), false)
        .unwrap();
    let claims = verify_token(&state, &token, TokenKind::Access).await.unwrap();

    state
        .revocations
        .revoke(&claims.jti, Duration::from_secs(300))
        .await
        .unwrap();

    let err = verify_token(&state, &token, TokenKind::Access).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_guard_rejects_expired_token() {
    let (_app, state) = setup_test_app();
    let token = state
        .tokens
        .issue(&subject(), Utc::now() - chrono::Duration::seconds(5), false)
        .unwrap();

    let err = verify_token(&state, &token, TokenKind::Access).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn test_guard_fails_closed_when_store_unavailable() {
    let (app, healthy) = setup_test_app();
    let session = verified_session(&app, &healthy, "user").await;

    let state = AppState::new(
        InMemoryStore::new(),
        Arc::new(UnavailableStore),
        test_jwt_config(),
        EmailConfig::disabled(),
        CorsConfig::default(),
    )
    .unwrap();

    let err = verify_token(&state, &session.access_token, TokenKind::Access)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);

    let app = init_router(state);
    let (status, body) = send(&app, authed_request("GET", "/api/v1/auth/me", &session.access_token)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], "server_error");
}
