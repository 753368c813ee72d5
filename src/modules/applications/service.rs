use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use jobboard_core::AppError;
use jobboard_models::applications::{Application, ApplicationCreate, ApplicationUpdate};
use jobboard_models::users::User;

use crate::middleware::role::ensure_owner;
use crate::state::AppState;
use crate::utils::ids::parse_uid;

pub struct ApplicationService;

impl ApplicationService {
    #[instrument(skip(state))]
    pub async fn get_applications(state: &AppState) -> Result<Vec<Application>, AppError> {
        state.applications.list().await
    }

    #[instrument(skip(state))]
    pub async fn get_user_applications(
        state: &AppState,
        user_uid: Uuid,
    ) -> Result<Vec<Application>, AppError> {
        state.applications.list_by_user(user_uid).await
    }

    #[instrument(skip(state))]
    pub async fn get_job_applications(
        state: &AppState,
        job_uid: &str,
    ) -> Result<Vec<Application>, AppError> {
        let uid = parse_uid(job_uid)?;
        if state.jobs.find_by_id(uid).await?.is_none() {
            return Err(AppError::job_not_found());
        }

        state.applications.list_by_job(uid).await
    }

    #[instrument(skip(state, applicant, dto), fields(applicant_uid = %applicant.uid))]
    pub async fn apply(
        state: &AppState,
        applicant: &User,
        job_id: &str,
        dto: ApplicationCreate,
    ) -> Result<Application, AppError> {
        let job_uid = parse_uid(job_id)?;
        let job = state
            .jobs
            .find_by_id(job_uid)
            .await?
            .ok_or_else(AppError::job_not_found)?;

        if state
            .applications
            .find_by_job_and_user(job.uid, applicant.uid)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request(anyhow!(
                "You have already applied for this job"
            )));
        }

        let application = state
            .applications
            .create(job.uid, applicant.uid, dto.cover_letter)
            .await?;

        info!(application_uid = %application.uid, job_uid = %job.uid, "Application submitted");
        Ok(application)
    }

    #[instrument(skip(state))]
    pub async fn get_application(
        state: &AppState,
        application_uid: &str,
    ) -> Result<Application, AppError> {
        let uid = parse_uid(application_uid)?;
        state
            .applications
            .find_by_id(uid)
            .await?
            .ok_or_else(AppError::application_not_found)
    }

    #[instrument(skip(state, dto))]
    pub async fn update_application(
        state: &AppState,
        caller_uid: Uuid,
        application_uid: &str,
        dto: ApplicationUpdate,
    ) -> Result<Application, AppError> {
        let application = Self::get_application(state, application_uid).await?;
        ensure_owner(caller_uid, application.user_uid)?;

        let updated = state
            .applications
            .update(application.uid, dto.cover_letter)
            .await?
            .ok_or_else(AppError::application_not_found)?;

        info!(application_uid = %updated.uid, "Application updated");
        Ok(updated)
    }

    #[instrument(skip(state))]
    pub async fn delete_application(
        state: &AppState,
        caller_uid: Uuid,
        application_uid: &str,
    ) -> Result<(), AppError> {
        let application = Self::get_application(state, application_uid).await?;
        ensure_owner(caller_uid, application.user_uid)?;

        if !state.applications.delete(application.uid).await? {
            return Err(AppError::application_not_found());
        }

        info!(application_uid = %application.uid, "Application withdrawn");
        Ok(())
    }
}
