use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use jobboard_core::{AppError, ErrorBody};
use jobboard_models::applications::{
    Application, ApplicationCreate, ApplicationUpdate, ApplyQuery,
};

use crate::middleware::auth::AccessClaims;
use crate::middleware::role::ApplicantRole;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ApplicationService;

/// List all applications
#[utoipa::path(
    get,
    path = "/api/v1/applications",
    responses(
        (status = 200, description = "All applications, newest first", body = Vec<Application>),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip_all)]
pub async fn get_applications(
    State(state): State<AppState>,
    _claims: AccessClaims,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = ApplicationService::get_applications(&state).await?;
    Ok(Json(applications))
}

/// Your own applications
#[utoipa::path(
    get,
    path = "/api/v1/applications/list",
    responses(
        (status = 200, description = "The caller's applications", body = Vec<Application>),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip_all)]
pub async fn get_user_applications(
    State(state): State<AppState>,
    claims: AccessClaims,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = ApplicationService::get_user_applications(&state, claims.user_uid()?).await?;
    Ok(Json(applications))
}

/// Applications to a job
#[utoipa::path(
    get,
    path = "/api/v1/applications/list/{job_uid}",
    params(("job_uid" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "Applications to the job", body = Vec<Application>),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, _claims))]
pub async fn get_job_applications(
    State(state): State<AppState>,
    _claims: AccessClaims,
    Path(job_uid): Path<String>,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = ApplicationService::get_job_applications(&state, &job_uid).await?;
    Ok(Json(applications))
}

/// Apply to a job (job seekers only)
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    params(ApplyQuery),
    request_body = ApplicationCreate,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Malformed id or already applied", body = ErrorBody),
        (status = 401, description = "Role may not apply", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, user, dto))]
pub async fn apply(
    State(state): State<AppState>,
    ApplicantRole(user): ApplicantRole,
    Query(query): Query<ApplyQuery>,
    ValidatedJson(dto): ValidatedJson<ApplicationCreate>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application = ApplicationService::apply(&state, &user, &query.job_id, dto).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// Get an application by id
#[utoipa::path(
    get,
    path = "/api/v1/applications/{application_uid}",
    params(("application_uid" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "Application", body = Application),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Application not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, _claims))]
pub async fn get_application(
    State(state): State<AppState>,
    _claims: AccessClaims,
    Path(application_uid): Path<String>,
) -> Result<Json<Application>, AppError> {
    let application = ApplicationService::get_application(&state, &application_uid).await?;
    Ok(Json(application))
}

/// Update your own application
#[utoipa::path(
    put,
    path = "/api/v1/applications/{application_uid}",
    params(("application_uid" = String, Path, description = "Application id")),
    request_body = ApplicationUpdate,
    responses(
        (status = 202, description = "Application updated", body = Application),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Not the applicant", body = ErrorBody),
        (status = 404, description = "Application not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, claims, dto))]
pub async fn update_application(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(application_uid): Path<String>,
    ValidatedJson(dto): ValidatedJson<ApplicationUpdate>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application =
        ApplicationService::update_application(&state, claims.user_uid()?, &application_uid, dto)
            .await?;
    Ok((StatusCode::ACCEPTED, Json(application)))
}

/// Withdraw your own application
#[utoipa::path(
    delete,
    path = "/api/v1/applications/{application_uid}",
    params(("application_uid" = String, Path, description = "Application id")),
    responses(
        (status = 204, description = "Application withdrawn"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Not the applicant", body = ErrorBody),
        (status = 404, description = "Application not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Applications"
)]
#[instrument(skip(state, claims))]
pub async fn delete_application(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(application_uid): Path<String>,
) -> Result<StatusCode, AppError> {
    ApplicationService::delete_application(&state, claims.user_uid()?, &application_uid).await?;
    Ok(StatusCode::NO_CONTENT)
}
