//! Persistence capabilities consumed by the services.
//!
//! Lookups return `Ok(None)` when nothing matches; mapping absence to a 404 is the
//! caller's decision. Lists are newest first.

use async_trait::async_trait;
use uuid::Uuid;

use jobboard_core::AppError;
use jobboard_models::applications::Application;
use jobboard_models::jobs::{Job, JobCreate, JobUpdate};
use jobboard_models::users::{NewUser, UpdateUserDto, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Case-insensitive match on the stored email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, uid: Uuid) -> Result<Option<User>, AppError>;

    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Fails with `UserAlreadyExists` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    async fn update_profile(&self, uid: Uuid, dto: UpdateUserDto)
    -> Result<Option<User>, AppError>;

    /// Returns `false` when no account has this email.
    async fn mark_verified(&self, email: &str) -> Result<bool, AppError>;

    /// Returns `false` when no account has this email.
    async fn update_password(&self, email: &str, hashed_password: &str)
    -> Result<bool, AppError>;

    /// Removes the account along with its jobs and applications.
    async fn delete(&self, uid: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Job>, AppError>;

    async fn find_by_id(&self, uid: Uuid) -> Result<Option<Job>, AppError>;

    async fn list_by_employer(&self, employer_uid: Uuid) -> Result<Vec<Job>, AppError>;

    async fn create(&self, employer_uid: Uuid, dto: JobCreate) -> Result<Job, AppError>;

    async fn update(&self, uid: Uuid, dto: JobUpdate) -> Result<Option<Job>, AppError>;

    /// Removes the job along with its applications.
    async fn delete(&self, uid: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Application>, AppError>;

    async fn find_by_id(&self, uid: Uuid) -> Result<Option<Application>, AppError>;

    async fn list_by_job(&self, job_uid: Uuid) -> Result<Vec<Application>, AppError>;

    async fn list_by_user(&self, user_uid: Uuid) -> Result<Vec<Application>, AppError>;

    async fn find_by_job_and_user(
        &self,
        job_uid: Uuid,
        user_uid: Uuid,
    ) -> Result<Option<Application>, AppError>;

    /// Fails with `BadRequest` when the user already applied to the job.
    async fn create(
        &self,
        job_uid: Uuid,
        user_uid: Uuid,
        cover_letter: String,
    ) -> Result<Application, AppError>;

    async fn update(
        &self,
        uid: Uuid,
        cover_letter: Option<String>,
    ) -> Result<Option<Application>, AppError>;

    async fn delete(&self, uid: Uuid) -> Result<bool, AppError>;
}

pub(crate) const DUPLICATE_APPLICATION: &str = "You have already applied for this job";
