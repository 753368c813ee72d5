use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A job posting, owned by the employer that created it.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Job {
    pub uid: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: String,
    pub is_active: bool,
    pub employer_uid: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct JobCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(length(min = 1, max = 100))]
    pub salary: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct JobUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub salary: Option<String>,
    pub is_active: Option<bool>,
}
