use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    confirm_password_reset, login, logout, me, password_reset_request, refresh_token, signup,
    verify_email,
};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh_token", get(refresh_token))
        .route("/logout", get(logout))
        .route("/me", get(me))
        .route("/verify_email/{token}", get(verify_email))
        .route("/password-reset-request", post(password_reset_request))
        .route("/confirm-password-reset/{token}", post(confirm_password_reset))
}
