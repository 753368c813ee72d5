mod common;

use axum::http::StatusCode;
use common::{authed_request, create_job, json_request, send, setup_test_app, verified_session};
use serde_json::{Value, json};
use uuid::Uuid;

async fn apply(app: &axum::Router, token: &str, job_id: &str, cover_letter: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "POST",
            &format!("/api/v1/applications?job_id={job_id}"),
            Some(token),
            json!({ "cover_letter": cover_letter }),
        ),
    )
    .await
}

#[tokio::test]
async fn test_seeker_applies_once() {
    let (app, state) = setup_test_app();
    let employer = verified_session(&app, &state, "employer").await;
    let seeker = verified_session(&app, &state, "user").await;
    let job = create_job(&app, &employer.access_token, "Rust engineer").await;
    let job_uid = job["uid"].as_str().unwrap();

    let (status, body) = apply(&app, &seeker.access_token, job_uid, "Hire me").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["job_uid"], job_uid);
    assert_eq!(body["user_uid"], seeker.uid);

    let (status, body) = apply(&app, &seeker.access_token, job_uid, "Hire me again").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "bad_request");
}

#[tokio::test]
async fn test_employer_cannot_apply() {
    let (app, state) = setup_test_app();
    let employer = verified_session(&app, &state, "employer").await;
    let job = create_job(&app, &employer.access_token, "Rust engineer").await;

    let (status, body) = apply(
        &app,
        &employer.access_token,
        job["uid"].as_str().unwrap(),
        "Applying to myself",
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "unauthorized_user_role");
}

#[tokio::test]
async fn test_apply_to_unknown_or_malformed_job() {
    let (app, state) = setup_test_app();
    let seeker = verified_session(&app, &state, "user").await;

    let (status, body) = apply(&app, &seeker.access_token, "nope", "Hello").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_uid");

    let (status, body) = apply(&app, &seeker.access_token, &Uuid::new_v4().to_string(), "Hello").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "job_not_found");
}

#[tokio::test]
async fn test_listing_applications() {
    let (app, state) = setup_test_app();
    let employer = verified_session(&app, &state, "employer").await;
    let first = verified_session(&app, &state, "user").await;
    let second = verified_session(&app, &state, "user").await;
    let job = create_job(&app, &employer.access_token, "Rust engineer").await;
    let job_uid = job["uid"].as_str().unwrap();

    apply(&app, &first.access_token, job_uid, "First").await;
    apply(&app, &second.access_token, job_uid, "Second").await;

    let (status, body) = send(&app, authed_request("GET", "/api/v1/applications", &first.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(&app, authed_request("GET", "/api/v1/applications/list", &first.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    let mine = body.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["cover_letter"], "First");

    let uri = format!("/api/v1/applications/list/{job_uid}");
    let (status, body) = send(&app, authed_request("GET", &uri, &employer.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    let letters: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["cover_letter"].as_str().unwrap())
        .collect();
    assert_eq!(letters, vec!["Second", "First"]);

    let uri = format!("/api/v1/applications/list/{}", Uuid::new_v4());
    let (status, body) = send(&app, authed_request("GET", &uri, &employer.access_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "job_not_found");
}

#[tokio::test]
async fn test_only_applicant_updates_and_withdraws() {
    let (app, state) = setup_test_app();
    let employer = verified_session(&app, &state, "employer").await;
    let seeker = verified_session(&app, &state, "user").await;
    let job = create_job(&app, &employer.access_token, "Rust engineer").await;

    let (_, application) = apply(&app, &seeker.access_token, job["uid"].as_str().unwrap(), "Hello").await;
    let uri = format!("/api/v1/applications/{}", application["uid"].as_str().unwrap());

    let (status, body) = send(&app, authed_request("GET", &uri, &employer.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cover_letter"], "Hello");

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, Some(&employer.access_token), json!({ "cover_letter": "Edited" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "unauthorized_user");

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, Some(&seeker.access_token), json!({ "cover_letter": "Edited" })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["cover_letter"], "Edited");

    let (status, _) = send(&app, authed_request("DELETE", &uri, &employer.access_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, authed_request("DELETE", &uri, &seeker.access_token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, authed_request("GET", &uri, &seeker.access_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "application_not_found");
}

#[tokio::test]
async fn test_deleting_job_removes_its_applications() {
    let (app, state) = setup_test_app();
    let employer = verified_session(&app, &state, "employer").await;
    let seeker = verified_session(&app, &state, "user").await;
    let job = create_job(&app, &employer.access_token, "Rust engineer").await;
    let job_uid = job["uid"].as_str().unwrap();
    apply(&app, &seeker.access_token, job_uid, "Hello").await;

    let (status, _) = send(
        &app,
        authed_request("DELETE", &format!("/api/v1/jobs/{job_uid}"), &employer.access_token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, authed_request("GET", "/api/v1/applications/list", &seeker.access_token)).await;
    assert!(body.as_array().unwrap().is_empty());
}
