use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_job, delete_job, get_employer_jobs, get_job, get_jobs, update_job,
};

pub fn init_jobs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_jobs).post(create_job))
        .route("/employer_listed_jobs/{user_uid}", get(get_employer_jobs))
        .route(
            "/{job_uid}",
            get(get_job).put(update_job).delete(delete_job),
        )
}
