//! In-memory repositories for tests and local runs without PostgreSQL.
//!
//! One [`InMemoryStore`] holds all three tables so deletes cascade the way the
//! foreign keys in `migrations/` do.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use jobboard_core::AppError;
use jobboard_models::applications::Application;
use jobboard_models::jobs::{Job, JobCreate, JobUpdate};
use jobboard_models::users::{NewUser, UpdateUserDto, User};

use crate::repository::{
    ApplicationRepository, DUPLICATE_APPLICATION, JobRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    jobs: HashMap<Uuid, Job>,
    applications: HashMap<Uuid, Application>,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(rows: impl Iterator<Item = T>, key: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by_key(|row| std::cmp::Reverse(key(row)));
    rows
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.trim().to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn find_by_id(&self, uid: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(&uid).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.users.values().cloned(), |u| u.created_at))
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        let email = user.email.to_lowercase();
        if tables.users.values().any(|u| u.email.to_lowercase() == email) {
            return Err(AppError::user_already_exists());
        }

        let now = Utc::now();
        let created = User {
            uid: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            hashed_password: user.hashed_password,
            phone_number: user.phone_number,
            gender: user.gender,
            role: user.role.as_str().to_string(),
            is_verified: user.is_verified,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(created.uid, created.clone());

        Ok(created)
    }

    async fn update_profile(
        &self,
        uid: Uuid,
        dto: UpdateUserDto,
    ) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.get_mut(&uid) else {
            return Ok(None);
        };

        if let Some(username) = dto.username {
            user.username = username;
        }
        if let Some(first_name) = dto.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = dto.last_name {
            user.last_name = last_name;
        }
        if let Some(phone_number) = dto.phone_number {
            user.phone_number = phone_number;
        }
        if let Some(gender) = dto.gender {
            user.gender = gender;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn mark_verified(&self, email: &str) -> Result<bool, AppError> {
        let email = email.trim().to_lowercase();
        let mut tables = self.tables.write().await;
        match tables
            .users
            .values_mut()
            .find(|u| u.email.to_lowercase() == email)
        {
            Some(user) => {
                user.is_verified = true;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(&self, email: &str, hashed_password: &str) -> Result<bool, AppError> {
        let email = email.trim().to_lowercase();
        let mut tables = self.tables.write().await;
        match tables
            .users
            .values_mut()
            .find(|u| u.email.to_lowercase() == email)
        {
            Some(user) => {
                user.hashed_password = hashed_password.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, uid: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&uid).is_none() {
            return Ok(false);
        }

        tables.jobs.retain(|_, job| job.employer_uid != uid);
        let Tables {
            jobs, applications, ..
        } = &mut *tables;
        applications.retain(|_, app| app.user_uid != uid && jobs.contains_key(&app.job_uid));

        Ok(true)
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Job>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.jobs.values().cloned(), |j| j.created_at))
    }

    async fn find_by_id(&self, uid: Uuid) -> Result<Option<Job>, AppError> {
        Ok(self.tables.read().await.jobs.get(&uid).cloned())
    }

    async fn list_by_employer(&self, employer_uid: Uuid) -> Result<Vec<Job>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .jobs
                .values()
                .filter(|j| j.employer_uid == employer_uid)
                .cloned(),
            |j| j.created_at,
        ))
    }

    async fn create(&self, employer_uid: Uuid, dto: JobCreate) -> Result<Job, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&employer_uid) {
            return Err(AppError::internal(anyhow!(
                "jobs.employer_uid references a missing user"
            )));
        }

        let job = Job {
            uid: Uuid::new_v4(),
            title: dto.title,
            description: dto.description,
            location: dto.location,
            salary: dto.salary,
            is_active: dto.is_active,
            employer_uid,
            created_at: Utc::now(),
        };
        tables.jobs.insert(job.uid, job.clone());

        Ok(job)
    }

    async fn update(&self, uid: Uuid, dto: JobUpdate) -> Result<Option<Job>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(job) = tables.jobs.get_mut(&uid) else {
            return Ok(None);
        };

        if let Some(title) = dto.title {
            job.title = title;
        }
        if let Some(description) = dto.description {
            job.description = description;
        }
        if let Some(location) = dto.location {
            job.location = location;
        }
        if let Some(salary) = dto.salary {
            job.salary = salary;
        }
        if let Some(is_active) = dto.is_active {
            job.is_active = is_active;
        }

        Ok(Some(job.clone()))
    }

    async fn delete(&self, uid: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.jobs.remove(&uid).is_none() {
            return Ok(false);
        }

        tables.applications.retain(|_, app| app.job_uid != uid);
        Ok(true)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Application>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.applications.values().cloned(), |a| {
            a.created_at
        }))
    }

    async fn find_by_id(&self, uid: Uuid) -> Result<Option<Application>, AppError> {
        Ok(self.tables.read().await.applications.get(&uid).cloned())
    }

    async fn list_by_job(&self, job_uid: Uuid) -> Result<Vec<Application>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .applications
                .values()
                .filter(|a| a.job_uid == job_uid)
                .cloned(),
            |a| a.created_at,
        ))
    }

    async fn list_by_user(&self, user_uid: Uuid) -> Result<Vec<Application>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .applications
                .values()
                .filter(|a| a.user_uid == user_uid)
                .cloned(),
            |a| a.created_at,
        ))
    }

    async fn find_by_job_and_user(
        &self,
        job_uid: Uuid,
        user_uid: Uuid,
    ) -> Result<Option<Application>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .values()
            .find(|a| a.job_uid == job_uid && a.user_uid == user_uid)
            .cloned())
    }

    async fn create(
        &self,
        job_uid: Uuid,
        user_uid: Uuid,
        cover_letter: String,
    ) -> Result<Application, AppError> {
        let mut tables = self.tables.write().await;

        if tables
            .applications
            .values()
            .any(|a| a.job_uid == job_uid && a.user_uid == user_uid)
        {
            return Err(AppError::bad_request(anyhow!(DUPLICATE_APPLICATION)));
        }
        if !tables.jobs.contains_key(&job_uid) || !tables.users.contains_key(&user_uid) {
            return Err(AppError::internal(anyhow!(
                "applications references a missing job or user"
            )));
        }

        let application = Application {
            uid: Uuid::new_v4(),
            job_uid,
            user_uid,
            cover_letter,
            created_at: Utc::now(),
        };
        tables
            .applications
            .insert(application.uid, application.clone());

        Ok(application)
    }

    async fn update(
        &self,
        uid: Uuid,
        cover_letter: Option<String>,
    ) -> Result<Option<Application>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(application) = tables.applications.get_mut(&uid) else {
            return Ok(None);
        };

        if let Some(cover_letter) = cover_letter {
            application.cover_letter = cover_letter;
        }

        Ok(Some(application.clone()))
    }

    async fn delete(&self, uid: Uuid) -> Result<bool, AppError> {
        Ok(self.tables.write().await.applications.remove(&uid).is_some())
    }
}
