use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use jobboard_core::{AppError, ErrorBody};
use jobboard_models::auth::{
    LoginRequest, LoginResponse, MessageResponse, PasswordResetConfirm, PasswordResetRequest,
    RefreshResponse,
};
use jobboard_models::users::{SignupRequest, UserResponse};

use crate::middleware::auth::{AccessClaims, RefreshClaims};
use crate::middleware::role::GeneralRole;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Create an account
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created, verification email queued", body = UserResponse),
        (status = 400, description = "Email already registered or invalid role", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = AuthService::signup(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Login and receive access and refresh tokens
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 202, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    let response = AuthService::login(&state, dto).await?;
    Ok((StatusCode::ACCEPTED, Json(response)))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    get,
    path = "/api/v1/auth/refresh_token",
    responses(
        (status = 200, description = "New access token", body = RefreshResponse),
        (status = 401, description = "Missing, invalid or non-refresh token", body = ErrorBody)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    RefreshClaims(claims): RefreshClaims,
) -> Result<Json<RefreshResponse>, AppError> {
    let response = AuthService::refresh(&state, claims).await?;
    Ok(Json(response))
}

/// Revoke the presented access token
#[utoipa::path(
    get,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Missing, invalid or non-access token", body = ErrorBody)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    AccessClaims(claims): AccessClaims,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::logout(&state, claims).await?;
    Ok(Json(MessageResponse::new("Logged out successfully!")))
}

/// Current account
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Account not verified", body = ErrorBody)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn me(GeneralRole(user): GeneralRole) -> Json<UserResponse> {
    Json(user.into())
}

/// Verify an email address from the emailed link
#[utoipa::path(
    get,
    path = "/api/v1/auth/verify_email/{token}",
    params(("token" = String, Path, description = "Email verification token")),
    responses(
        (status = 200, description = "Account verified", body = MessageResponse),
        (status = 400, description = "Invalid, expired or used token", body = ErrorBody),
        (status = 404, description = "Account no longer exists", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = AuthService::verify_email(&state, &token).await?;
    Ok(Json(response))
}

/// Request a password reset email
#[utoipa::path(
    post,
    path = "/api/v1/auth/password-reset-request",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Reset email sent if the account exists", body = MessageResponse),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn password_reset_request(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<PasswordResetRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = AuthService::request_password_reset(&state, dto).await?;
    Ok(Json(response))
}

/// Set a new password using the emailed reset token
#[utoipa::path(
    post,
    path = "/api/v1/auth/confirm-password-reset/{token}",
    params(("token" = String, Path, description = "Password reset token")),
    request_body = PasswordResetConfirm,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Passwords do not match, or invalid, expired or used token", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ValidatedJson(dto): ValidatedJson<PasswordResetConfirm>,
) -> Result<Json<MessageResponse>, AppError> {
    let response = AuthService::confirm_password_reset(&state, &token, dto).await?;
    Ok(Json(response))
}
