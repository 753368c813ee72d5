use tracing::{info, instrument};

use jobboard_core::AppError;
use jobboard_models::jobs::{Job, JobCreate, JobUpdate};
use jobboard_models::users::User;

use crate::middleware::role::ensure_owner;
use crate::state::AppState;
use crate::utils::ids::parse_uid;

pub struct JobService;

impl JobService {
    #[instrument(skip(state))]
    pub async fn get_jobs(state: &AppState) -> Result<Vec<Job>, AppError> {
        state.jobs.list().await
    }

    #[instrument(skip(state))]
    pub async fn get_job(state: &AppState, job_uid: &str) -> Result<Job, AppError> {
        let uid = parse_uid(job_uid)?;
        state
            .jobs
            .find_by_id(uid)
            .await?
            .ok_or_else(AppError::job_not_found)
    }

    #[instrument(skip(state, employer, dto), fields(employer_uid = %employer.uid))]
    pub async fn create_job(
        state: &AppState,
        employer: &User,
        dto: JobCreate,
    ) -> Result<Job, AppError> {
        let job = state.jobs.create(employer.uid, dto).await?;
        info!(job_uid = %job.uid, "Job listed");
        Ok(job)
    }

    /// Jobs listed by `user_uid`. Callers may only list their own.
    #[instrument(skip(state, caller), fields(caller_uid = %caller.uid))]
    pub async fn get_employer_jobs(
        state: &AppState,
        caller: &User,
        user_uid: &str,
    ) -> Result<Vec<Job>, AppError> {
        let employer_uid = parse_uid(user_uid)?;
        ensure_owner(caller.uid, employer_uid)?;
        state.jobs.list_by_employer(employer_uid).await
    }

    #[instrument(skip(state, caller, dto), fields(caller_uid = %caller.uid))]
    pub async fn update_job(
        state: &AppState,
        caller: &User,
        job_uid: &str,
        dto: JobUpdate,
    ) -> Result<Job, AppError> {
        let job = Self::get_job(state, job_uid).await?;
        ensure_owner(caller.uid, job.employer_uid)?;

        let updated = state
            .jobs
            .update(job.uid, dto)
            .await?
            .ok_or_else(AppError::job_not_found)?;

        info!(job_uid = %updated.uid, "Job updated");
        Ok(updated)
    }

    #[instrument(skip(state, caller), fields(caller_uid = %caller.uid))]
    pub async fn delete_job(state: &AppState, caller: &User, job_uid: &str) -> Result<(), AppError> {
        let job = Self::get_job(state, job_uid).await?;
        ensure_owner(caller.uid, job.employer_uid)?;

        if !state.jobs.delete(job.uid).await? {
            return Err(AppError::job_not_found());
        }

        info!(job_uid = %job.uid, "Job deleted");
        Ok(())
    }
}
