mod common;

use axum::http::StatusCode;
use common::{authed_request, json_request, send, setup_test_app, verified_session};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_list_users_requires_verified_account() {
    let (app, state) = setup_test_app();
    let session = verified_session(&app, &state, "user").await;
    verified_session(&app, &state, "employer").await;

    let (status, body) = send(&app, authed_request("GET", "/api/v1/users", &session.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("hashed_password").is_none()));
}

#[tokio::test]
async fn test_get_user_by_id() {
    let (app, state) = setup_test_app();
    let session = verified_session(&app, &state, "user").await;

    let uri = format!("/api/v1/users/{}", session.uid);
    let (status, body) = send(&app, authed_request("GET", &uri, &session.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], session.email);

    let (status, body) = send(&app, authed_request("GET", "/api/v1/users/123", &session.access_token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_uid");

    let uri = format!("/api/v1/users/{}", Uuid::new_v4());
    let (status, body) = send(&app, authed_request("GET", &uri, &session.access_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "user_not_found");
}

#[tokio::test]
async fn test_update_own_profile_only() {
    let (app, state) = setup_test_app();
    let owner = verified_session(&app, &state, "user").await;
    let other = verified_session(&app, &state, "user").await;
    let uri = format!("/api/v1/users/{}", owner.uid);

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, Some(&other.access_token), json!({ "first_name": "Mallory" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "unauthorized_user");

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, Some(&owner.access_token), json!({ "first_name": "Grace" })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["first_name"], "Grace");
    assert_eq!(body["last_name"], "User");
}

#[tokio::test]
async fn test_delete_own_account() {
    let (app, state) = setup_test_app();
    let owner = verified_session(&app, &state, "user").await;
    let other = verified_session(&app, &state, "user").await;
    let uri = format!("/api/v1/users/{}", owner.uid);

    let (status, _) = send(&app, authed_request("DELETE", &uri, &other.access_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, authed_request("DELETE", &uri, &owner.access_token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, authed_request("GET", "/api/v1/auth/me", &owner.access_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "user_not_found");
}
