mod common;

use axum::http::StatusCode;
use common::{authed_request, create_job, json_request, send, setup_test_app, verified_session};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_user_role_cannot_list_jobs() {
    let (app, state) = setup_test_app();
    let seeker = verified_session(&app, &state, "user").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/jobs",
            Some(&seeker.access_token),
            json!({
                "title": "Rust engineer",
                "description": "Build things",
                "location": "Lagos",
                "salary": "100k"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "unauthorized_user_role");
}

#[tokio::test]
async fn test_employer_creates_and_reads_job() {
    let (app, state) = setup_test_app();
    let employer = verified_session(&app, &state, "employer").await;

    let job = create_job(&app, &employer.access_token, "Rust engineer").await;
    assert_eq!(job["employer_uid"], employer.uid);
    assert_eq!(job["is_active"], true);

    let uri = format!("/api/v1/jobs/{}", job["uid"].as_str().unwrap());
    let (status, body) = send(&app, authed_request("GET", &uri, &employer.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Rust engineer");
}

#[tokio::test]
async fn test_jobs_listed_newest_first() {
    let (app, state) = setup_test_app();
    let employer = verified_session(&app, &state, "employer").await;
    create_job(&app, &employer.access_token, "First").await;
    create_job(&app, &employer.access_token, "Second").await;

    let (status, body) = send(&app, authed_request("GET", "/api/v1/jobs", &employer.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn test_get_job_invalid_and_missing_ids() {
    let (app, state) = setup_test_app();
    let seeker = verified_session(&app, &state, "user").await;

    let (status, body) = send(&app, authed_request("GET", "/api/v1/jobs/not-a-uuid", &seeker.access_token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "invalid_uid");

    let uri = format!("/api/v1/jobs/{}", Uuid::new_v4());
    let (status, body) = send(&app, authed_request("GET", &uri, &seeker.access_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "job_not_found");
}

#[tokio::test]
async fn test_only_owner_updates_and_deletes_job() {
    let (app, state) = setup_test_app();
    let owner = verified_session(&app, &state, "employer").await;
    let rival = verified_session(&app, &state, "employer").await;

    let job = create_job(&app, &owner.access_token, "Rust engineer").await;
    let uri = format!("/api/v1/jobs/{}", job["uid"].as_str().unwrap());

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, Some(&rival.access_token), json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "unauthorized_user");

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, Some(&owner.access_token), json!({ "salary": "150k" })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["salary"], "150k");
    assert_eq!(body["title"], "Rust engineer");

    let (status, _) = send(&app, authed_request("DELETE", &uri, &rival.access_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, authed_request("DELETE", &uri, &owner.access_token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, authed_request("GET", &uri, &owner.access_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employer_listed_jobs_self_only() {
    let (app, state) = setup_test_app();
    let owner = verified_session(&app, &state, "employer").await;
    let other = verified_session(&app, &state, "employer").await;
    create_job(&app, &owner.access_token, "Owned").await;
    create_job(&app, &other.access_token, "Not owned").await;

    let uri = format!("/api/v1/jobs/employer_listed_jobs/{}", owner.uid);
    let (status, body) = send(&app, authed_request("GET", &uri, &owner.access_token)).await;
    assert_eq!(status, StatusCode::OK);
    let jobs = body.as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["title"], "Owned");

    let (status, body) = send(&app, authed_request("GET", &uri, &other.access_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "unauthorized_user");
}
