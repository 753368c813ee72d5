use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use jobboard_core::{AppError, ErrorBody};
use jobboard_models::users::{UpdateUserDto, UserResponse};

use crate::middleware::auth::AccessClaims;
use crate::middleware::role::GeneralRole;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::UserService;

/// List all accounts
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All accounts, newest first", body = Vec<UserResponse>),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Account not verified", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_users(
    State(state): State<AppState>,
    _user: GeneralRole,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = UserService::get_users(&state).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get an account by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_uid}",
    params(("user_uid" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 404, description = "Account not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, _claims))]
pub async fn get_user(
    State(state): State<AppState>,
    _claims: AccessClaims,
    Path(user_uid): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::get_user(&state, &user_uid).await?;
    Ok(Json(user.into()))
}

/// Update your own profile
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_uid}",
    params(("user_uid" = String, Path, description = "Account id")),
    request_body = UpdateUserDto,
    responses(
        (status = 202, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Not the account owner", body = ErrorBody),
        (status = 404, description = "Account not found", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, claims, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(user_uid): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = UserService::update_user(&state, claims.user_uid()?, &user_uid, dto).await?;
    Ok((StatusCode::ACCEPTED, Json(user.into())))
}

/// Delete your own account
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_uid}",
    params(("user_uid" = String, Path, description = "Account id")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 401, description = "Not the account owner", body = ErrorBody),
        (status = 404, description = "Account not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, claims))]
pub async fn delete_user(
    State(state): State<AppState>,
    claims: AccessClaims,
    Path(user_uid): Path<String>,
) -> Result<StatusCode, AppError> {
    UserService::delete_user(&state, claims.user_uid()?, &user_uid).await?;
    Ok(StatusCode::NO_CONTENT)
}
