mod common;

use axum::extract::FromRequestParts;
use axum::http::Request;
use axum::http::request::Parts;
use common::{generate_unique_email, login, setup_test_app, signup, verified_session};
use jobboard::jobboard_core::ErrorKind;
use jobboard::jobboard_models::users::UserRole;
use jobboard::middleware::role::{ApplicantRole, GeneralRole, JobListingRole};

fn parts(token: &str) -> Parts {
    Request::builder()
        .uri("/")
        .header("authorization", format!("Bearer {token}"))
        .body(())
        .unwrap()
        .into_parts()
        .0
}

#[test]
fn test_role_tables() {
    assert_eq!(
        GeneralRole::ROLES,
        &[UserRole::User, UserRole::Employer, UserRole::Admin]
    );
    assert_eq!(JobListingRole::ROLES, &[UserRole::Employer, UserRole::Admin]);
    assert_eq!(ApplicantRole::ROLES, &[UserRole::User]);
}

#[tokio::test]
async fn test_employer_passes_job_listing_gate() {
    let (app, state) = setup_test_app();
    let session = verified_session(&app, &state, "employer").await;

    let JobListingRole(user) = JobListingRole::from_request_parts(&mut parts(&session.access_token), &state)
        .await
        .unwrap();
    assert_eq!(user.uid.to_string(), session.uid);

    let err = ApplicantRole::from_request_parts(&mut parts(&session.access_token), &state)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RoleCheckAccess);
}

#[tokio::test]
async fn test_seeker_passes_applicant_gate_only() {
    let (app, state) = setup_test_app();
    let session = verified_session(&app, &state, "user").await;

    assert!(
        ApplicantRole::from_request_parts(&mut parts(&session.access_token), &state)
            .await
            .is_ok()
    );

    let err = JobListingRole::from_request_parts(&mut parts(&session.access_token), &state)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RoleCheckAccess);
}

#[tokio::test]
async fn test_unverified_account_fails_every_gate() {
    let (app, state) = setup_test_app();
    let email = generate_unique_email();
    signup(&app, &email, "employer").await;
    let session = login(&app, &email).await;

    for result in [
        GeneralRole::from_request_parts(&mut parts(&session.access_token), &state)
            .await
            .map(|_| ()),
        JobListingRole::from_request_parts(&mut parts(&session.access_token), &state)
            .await
            .map(|_| ()),
    ] {
        assert_eq!(result.unwrap_err().kind, ErrorKind::AccountNotVerified);
    }
}

#[tokio::test]
async fn test_deleted_account_fails_gate_with_live_token() {
    let (app, state) = setup_test_app();
    let session = verified_session(&app, &state, "user").await;

    let uid = uuid::Uuid::parse_str(&session.uid).unwrap();
    state.users.delete(uid).await.unwrap();

    let err = GeneralRole::from_request_parts(&mut parts(&session.access_token), &state)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UserNotFound);
}
