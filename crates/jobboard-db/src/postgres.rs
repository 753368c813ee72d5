use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use jobboard_core::AppError;
use jobboard_models::applications::Application;
use jobboard_models::jobs::{Job, JobCreate, JobUpdate};
use jobboard_models::users::{NewUser, UpdateUserDto, User};

use crate::repository::{
    ApplicationRepository, DUPLICATE_APPLICATION, JobRepository, UserRepository,
};

const USER_COLUMNS: &str = "uid, username, email, first_name, last_name, hashed_password, \
     phone_number, gender, role, is_verified, created_at, updated_at";

const JOB_COLUMNS: &str =
    "uid, title, description, location, salary, is_active, employer_uid, created_at";

const APPLICATION_COLUMNS: &str = "uid, job_uid, user_uid, cover_letter, created_at";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// PostgreSQL-backed implementation of every repository trait.
#[derive(Clone, Debug)]
pub struct PgRepository {
    db: PgPool,
}

impl PgRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email.trim())
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, uid: Uuid) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE uid = $1"))
                .bind(uid)
                .fetch_optional(&self.db)
                .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    #[instrument(skip(self))]
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users
                   (username, email, first_name, last_name, hashed_password,
                    phone_number, gender, role, is_verified)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.hashed_password)
        .bind(&user.phone_number)
        .bind(&user.gender)
        .bind(user.role.as_str())
        .bind(user.is_verified)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::user_already_exists();
            }
            AppError::from(e)
        })?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn update_profile(
        &self,
        uid: Uuid,
        dto: UpdateUserDto,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users SET
                   username = COALESCE($2, username),
                   first_name = COALESCE($3, first_name),
                   last_name = COALESCE($4, last_name),
                   phone_number = COALESCE($5, phone_number),
                   gender = COALESCE($6, gender),
                   updated_at = NOW()
               WHERE uid = $1
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(uid)
        .bind(dto.username)
        .bind(dto.first_name)
        .bind(dto.last_name)
        .bind(dto.phone_number)
        .bind(dto.gender)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn mark_verified(&self, email: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET is_verified = TRUE, updated_at = NOW() WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email.trim())
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, hashed_password))]
    async fn update_password(&self, email: &str, hashed_password: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET hashed_password = $2, updated_at = NOW() WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email.trim())
        .bind(hashed_password)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, uid: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE uid = $1")
            .bind(uid)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl JobRepository for PgRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Job>, AppError> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(jobs)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, uid: Uuid) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE uid = $1"))
            .bind(uid)
            .fetch_optional(&self.db)
            .await?;

        Ok(job)
    }

    #[instrument(skip(self))]
    async fn list_by_employer(&self, employer_uid: Uuid) -> Result<Vec<Job>, AppError> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE employer_uid = $1 ORDER BY created_at DESC"
        ))
        .bind(employer_uid)
        .fetch_all(&self.db)
        .await?;

        Ok(jobs)
    }

    #[instrument(skip(self))]
    async fn create(&self, employer_uid: Uuid, dto: JobCreate) -> Result<Job, AppError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"INSERT INTO jobs (title, description, location, salary, is_active, employer_uid)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {JOB_COLUMNS}"#
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.location)
        .bind(&dto.salary)
        .bind(dto.is_active)
        .bind(employer_uid)
        .fetch_one(&self.db)
        .await?;

        Ok(job)
    }

    #[instrument(skip(self))]
    async fn update(&self, uid: Uuid, dto: JobUpdate) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            r#"UPDATE jobs SET
                   title = COALESCE($2, title),
                   description = COALESCE($3, description),
                   location = COALESCE($4, location),
                   salary = COALESCE($5, salary),
                   is_active = COALESCE($6, is_active)
               WHERE uid = $1
               RETURNING {JOB_COLUMNS}"#
        ))
        .bind(uid)
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.location)
        .bind(dto.salary)
        .bind(dto.is_active)
        .fetch_optional(&self.db)
        .await?;

        Ok(job)
    }

    #[instrument(skip(self))]
    async fn delete(&self, uid: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE uid = $1")
            .bind(uid)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ApplicationRepository for PgRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Application>, AppError> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(applications)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, uid: Uuid) -> Result<Option<Application>, AppError> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE uid = $1"
        ))
        .bind(uid)
        .fetch_optional(&self.db)
        .await?;

        Ok(application)
    }

    #[instrument(skip(self))]
    async fn list_by_job(&self, job_uid: Uuid) -> Result<Vec<Application>, AppError> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE job_uid = $1 ORDER BY created_at DESC"
        ))
        .bind(job_uid)
        .fetch_all(&self.db)
        .await?;

        Ok(applications)
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user_uid: Uuid) -> Result<Vec<Application>, AppError> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE user_uid = $1 ORDER BY created_at DESC"
        ))
        .bind(user_uid)
        .fetch_all(&self.db)
        .await?;

        Ok(applications)
    }

    #[instrument(skip(self))]
    async fn find_by_job_and_user(
        &self,
        job_uid: Uuid,
        user_uid: Uuid,
    ) -> Result<Option<Application>, AppError> {
        let application = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE job_uid = $1 AND user_uid = $2"
        ))
        .bind(job_uid)
        .bind(user_uid)
        .fetch_optional(&self.db)
        .await?;

        Ok(application)
    }

    #[instrument(skip(self, cover_letter))]
    async fn create(
        &self,
        job_uid: Uuid,
        user_uid: Uuid,
        cover_letter: String,
    ) -> Result<Application, AppError> {
        let application = sqlx::query_as::<_, Application>(&format!(
            r#"INSERT INTO applications (job_uid, user_uid, cover_letter)
               VALUES ($1, $2, $3)
               RETURNING {APPLICATION_COLUMNS}"#
        ))
        .bind(job_uid)
        .bind(user_uid)
        .bind(cover_letter)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::bad_request(anyhow!(DUPLICATE_APPLICATION));
            }
            AppError::from(e)
        })?;

        Ok(application)
    }

    #[instrument(skip(self, cover_letter))]
    async fn update(
        &self,
        uid: Uuid,
        cover_letter: Option<String>,
    ) -> Result<Option<Application>, AppError> {
        let application = sqlx::query_as::<_, Application>(&format!(
            r#"UPDATE applications SET cover_letter = COALESCE($2, cover_letter)
               WHERE uid = $1
               RETURNING {APPLICATION_COLUMNS}"#
        ))
        .bind(uid)
        .bind(cover_letter)
        .fetch_optional(&self.db)
        .await?;

        Ok(application)
    }

    #[instrument(skip(self))]
    async fn delete(&self, uid: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM applications WHERE uid = $1")
            .bind(uid)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
