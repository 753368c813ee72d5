//! Application error type with a fixed HTTP mapping.
//!
//! Every domain failure is an [`ErrorKind`] with a stable status code, machine-readable
//! `error_code` and client-facing message. Anything that is not a domain failure converts
//! into [`ErrorKind::Internal`] through the blanket `From` impl, so `?` works on sqlx,
//! redis, lettre and friends without ceremony.
//!
//! Internal failures are logged with their full chain and answered with a generic body.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingCredentials,
    InvalidToken,
    InvalidLinkToken,
    TokenExpired,
    AccessTokenRequired,
    RefreshTokenRequired,
    RoleCheckAccess,
    AccountNotVerified,
    UserAlreadyExists,
    UserNotFound,
    JobNotFound,
    ApplicationNotFound,
    InvalidEmailOrPassword,
    InvalidId,
    NotAuthorized,
    BadRequest,
    Validation,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::MissingCredentials
            | ErrorKind::InvalidToken
            | ErrorKind::AccessTokenRequired
            | ErrorKind::RefreshTokenRequired
            | ErrorKind::RoleCheckAccess
            | ErrorKind::NotAuthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::AccountNotVerified => StatusCode::FORBIDDEN,
            ErrorKind::TokenExpired
            | ErrorKind::InvalidLinkToken
            | ErrorKind::UserAlreadyExists
            | ErrorKind::InvalidEmailOrPassword
            | ErrorKind::InvalidId
            | ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::UserNotFound | ErrorKind::JobNotFound | ErrorKind::ApplicationNotFound => {
                StatusCode::NOT_FOUND
            }
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::MissingCredentials => "not_authenticated",
            ErrorKind::InvalidToken | ErrorKind::InvalidLinkToken => "invalid_token",
            ErrorKind::TokenExpired => "token_expired",
            ErrorKind::AccessTokenRequired => "access_token_required",
            ErrorKind::RefreshTokenRequired => "refresh_token_required",
            ErrorKind::RoleCheckAccess => "unauthorized_user_role",
            ErrorKind::AccountNotVerified => "account_not_verified",
            ErrorKind::UserAlreadyExists => "user_exists",
            ErrorKind::UserNotFound => "user_not_found",
            ErrorKind::JobNotFound => "job_not_found",
            ErrorKind::ApplicationNotFound => "application_not_found",
            ErrorKind::InvalidEmailOrPassword => "invalid_login_details",
            ErrorKind::InvalidId => "invalid_uid",
            ErrorKind::NotAuthorized => "unauthorized_user",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Validation => "validation_error",
            ErrorKind::Internal => "server_error",
        }
    }

    /// Fixed client-facing message. `None` means the message comes from the error itself.
    fn message(self) -> Option<&'static str> {
        match self {
            ErrorKind::MissingCredentials => Some("Not authenticated"),
            ErrorKind::InvalidToken => Some("Invalid or expired token"),
            ErrorKind::InvalidLinkToken => Some("Invalid or expired link"),
            ErrorKind::TokenExpired => Some("Token has expired or you've been logged out"),
            ErrorKind::AccessTokenRequired => Some("Please provide a valid access token"),
            ErrorKind::RefreshTokenRequired => Some("Please provide a valid refresh token"),
            ErrorKind::RoleCheckAccess => Some("You are not authorized to complete this action!"),
            ErrorKind::AccountNotVerified => Some("Account not verified"),
            ErrorKind::UserAlreadyExists => Some("User already exists!"),
            ErrorKind::UserNotFound => Some("User not found"),
            ErrorKind::JobNotFound => Some("Job not found"),
            ErrorKind::ApplicationNotFound => Some("Application not found"),
            ErrorKind::InvalidEmailOrPassword => Some("Invalid login credentials"),
            ErrorKind::InvalidId => Some("This is not a valid UUID!"),
            ErrorKind::NotAuthorized => Some("You do not have the permission to continue!"),
            ErrorKind::Internal => Some("Ooops! Something went wrong"),
            ErrorKind::BadRequest | ErrorKind::Validation => None,
        }
    }

    fn resolution(self) -> Option<&'static str> {
        match self {
            ErrorKind::MissingCredentials => Some("Provide a bearer token in the Authorization header"),
            ErrorKind::InvalidToken | ErrorKind::TokenExpired => {
                Some("Please generate a new token or login again")
            }
            ErrorKind::InvalidLinkToken => Some("Please request a new link"),
            ErrorKind::AccessTokenRequired => Some("Please generate an access token"),
            ErrorKind::RefreshTokenRequired => Some("Please get a new refresh token"),
            ErrorKind::AccountNotVerified => Some("Please check your email for verification link"),
            ErrorKind::UserAlreadyExists => {
                Some("Signup with a different email or proceed to login")
            }
            ErrorKind::UserNotFound => Some("The user does not exist or has been removed"),
            ErrorKind::InvalidEmailOrPassword => Some("Please provide a valid email or password"),
            ErrorKind::InvalidId => Some("Please provide a valid id"),
            _ => None,
        }
    }
}

/// JSON body returned for every error.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    pub error_code: String,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    fn of(kind: ErrorKind) -> Self {
        let message = kind.message().unwrap_or(kind.code());
        Self::new(kind, anyhow!(message))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    pub fn missing_credentials() -> Self {
        Self::of(ErrorKind::MissingCredentials)
    }

    pub fn invalid_token() -> Self {
        Self::of(ErrorKind::InvalidToken)
    }

    /// Verification or reset link token that is bad, expired or already used.
    pub fn invalid_link_token() -> Self {
        Self::of(ErrorKind::InvalidLinkToken)
    }

    pub fn token_expired() -> Self {
        Self::of(ErrorKind::TokenExpired)
    }

    pub fn access_token_required() -> Self {
        Self::of(ErrorKind::AccessTokenRequired)
    }

    pub fn refresh_token_required() -> Self {
        Self::of(ErrorKind::RefreshTokenRequired)
    }

    pub fn role_check_access() -> Self {
        Self::of(ErrorKind::RoleCheckAccess)
    }

    pub fn account_not_verified() -> Self {
        Self::of(ErrorKind::AccountNotVerified)
    }

    pub fn user_already_exists() -> Self {
        Self::of(ErrorKind::UserAlreadyExists)
    }

    pub fn user_not_found() -> Self {
        Self::of(ErrorKind::UserNotFound)
    }

    pub fn job_not_found() -> Self {
        Self::of(ErrorKind::JobNotFound)
    }

    pub fn application_not_found() -> Self {
        Self::of(ErrorKind::ApplicationNotFound)
    }

    pub fn invalid_email_or_password() -> Self {
        Self::of(ErrorKind::InvalidEmailOrPassword)
    }

    pub fn invalid_id() -> Self {
        Self::of(ErrorKind::InvalidId)
    }

    pub fn not_authorized() -> Self {
        Self::of(ErrorKind::NotAuthorized)
    }

    pub fn body(&self) -> ErrorBody {
        let message = match self.kind.message() {
            Some(fixed) => fixed.to_string(),
            None => self.error.to_string(),
        };

        ErrorBody {
            message,
            resolution: self.kind.resolution().map(str::to_string),
            error_code: self.kind.code().to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::Internal {
            tracing::error!(error = ?self.error, "Unhandled error");
        }

        (self.kind.status(), Json(self.body())).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_token_response() {
        let (status, body) = body_json(AppError::invalid_token()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "invalid_token");
        assert_eq!(body["message"], "Invalid or expired token");
        assert!(body.get("resolution").is_some());
    }

    #[tokio::test]
    async fn test_invalid_link_token_is_bad_request() {
        let (status, body) = body_json(AppError::invalid_link_token()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "invalid_token");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err: AppError = std::io::Error::other("connection refused at 10.0.0.3:5432").into();
        assert_eq!(err.kind, ErrorKind::Internal);

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error_code"], "server_error");
        assert!(!body.to_string().contains("10.0.0.3"));
        assert!(body.get("resolution").is_none());
    }

    #[tokio::test]
    async fn test_bad_request_carries_message() {
        let (status, body) = body_json(AppError::bad_request(anyhow!("email is required"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "email is required");
        assert_eq!(body["error_code"], "bad_request");
    }

    #[test]
    fn test_status_table() {
        assert_eq!(ErrorKind::TokenExpired.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::RoleCheckAccess.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorKind::AccountNotVerified.status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorKind::JobNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::InvalidEmailOrPassword.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::NotAuthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorKind::Validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
