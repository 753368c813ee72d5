use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    apply, delete_application, get_application, get_applications, get_job_applications,
    get_user_applications, update_application,
};

pub fn init_applications_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_applications).post(apply))
        .route("/list", get(get_user_applications))
        .route("/list/{job_uid}", get(get_job_applications))
        .route(
            "/{application_uid}",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
}
