use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use jobboard_core::{AppError, ErrorBody};
use jobboard_models::jobs::{Job, JobCreate, JobUpdate};

use crate::middleware::role::{GeneralRole, JobListingRole};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::JobService;

/// List all jobs
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    responses(
        (status = 200, description = "All jobs, newest first", body = Vec<Job>),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Account not verified", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip_all)]
pub async fn get_jobs(
    State(state): State<AppState>,
    _user: GeneralRole,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = JobService::get_jobs(&state).await?;
    Ok(Json(jobs))
}

/// Get a job by id
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{job_uid}",
    params(("job_uid" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job", body = Job),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, _user))]
pub async fn get_job(
    State(state): State<AppState>,
    _user: GeneralRole,
    Path(job_uid): Path<String>,
) -> Result<Json<Job>, AppError> {
    let job = JobService::get_job(&state, &job_uid).await?;
    Ok(Json(job))
}

/// List a new job (employers and admins)
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = JobCreate,
    responses(
        (status = 201, description = "Job listed", body = Job),
        (status = 401, description = "Role may not list jobs", body = ErrorBody),
        (status = 403, description = "Account not verified", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip_all)]
pub async fn create_job(
    State(state): State<AppState>,
    JobListingRole(user): JobListingRole,
    ValidatedJson(dto): ValidatedJson<JobCreate>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = JobService::create_job(&state, &user, dto).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Jobs listed by an employer (own listings only)
#[utoipa::path(
    get,
    path = "/api/v1/jobs/employer_listed_jobs/{user_uid}",
    params(("user_uid" = String, Path, description = "Employer account id")),
    responses(
        (status = 200, description = "The employer's jobs", body = Vec<Job>),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Not the employer", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, user))]
pub async fn get_employer_jobs(
    State(state): State<AppState>,
    GeneralRole(user): GeneralRole,
    Path(user_uid): Path<String>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = JobService::get_employer_jobs(&state, &user, &user_uid).await?;
    Ok(Json(jobs))
}

/// Update a job you listed
#[utoipa::path(
    put,
    path = "/api/v1/jobs/{job_uid}",
    params(("job_uid" = String, Path, description = "Job id")),
    request_body = JobUpdate,
    responses(
        (status = 202, description = "Job updated", body = Job),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Not the job owner", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, user, dto))]
pub async fn update_job(
    State(state): State<AppState>,
    GeneralRole(user): GeneralRole,
    Path(job_uid): Path<String>,
    ValidatedJson(dto): ValidatedJson<JobUpdate>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = JobService::update_job(&state, &user, &job_uid, dto).await?;
    Ok((StatusCode::ACCEPTED, Json(job)))
}

/// Delete a job you listed
#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{job_uid}",
    params(("job_uid" = String, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Not the job owner", body = ErrorBody),
        (status = 404, description = "Job not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state, user))]
pub async fn delete_job(
    State(state): State<AppState>,
    GeneralRole(user): GeneralRole,
    Path(job_uid): Path<String>,
) -> Result<StatusCode, AppError> {
    JobService::delete_job(&state, &user, &job_uid).await?;
    Ok(StatusCode::NO_CONTENT)
}
