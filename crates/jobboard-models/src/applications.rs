use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// An application to a job. One per (job, applicant) pair.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Application {
    pub uid: Uuid,
    pub job_uid: Uuid,
    pub user_uid: Uuid,
    pub cover_letter: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct ApplicationCreate {
    #[validate(length(min = 1))]
    pub cover_letter: String,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct ApplicationUpdate {
    #[validate(length(min = 1))]
    pub cover_letter: Option<String>,
}

/// `?job_id=` on `POST /applications`.
#[derive(Deserialize, Debug, Clone, IntoParams)]
pub struct ApplyQuery {
    /// Job to apply to
    pub job_id: String,
}
