use anyhow::anyhow;
use chrono::{Duration, Utc};
use tracing::{error, info, instrument};

use jobboard_auth::{Claims, TokenPurpose, TokenSubject};
use jobboard_core::{AppError, hash_password, verify_password};
use jobboard_models::auth::{
    LoginRequest, LoginResponse, LoginUser, MessageResponse, PasswordResetConfirm,
    PasswordResetRequest, RefreshResponse,
};
use jobboard_models::users::{NewUser, SignupRequest, User, UserRole, normalize_email};

use crate::middleware::auth::{link_token_rejection, remaining_lifetime};
use crate::state::AppState;

pub const PASSWORD_RESET_REQUESTED: &str =
    "If an account exists with that email, a password reset link has been sent.";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn signup(state: &AppState, dto: SignupRequest) -> Result<User, AppError> {
        let role = dto.role.unwrap_or_default();
        if role == UserRole::Admin {
            return Err(AppError::bad_request(anyhow!(
                "Admin accounts cannot be created through signup"
            )));
        }

        let email = normalize_email(&dto.email);
        if state.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::user_already_exists());
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = state
            .users
            .create(NewUser {
                username: dto.username,
                email,
                first_name: dto.first_name,
                last_name: dto.last_name,
                hashed_password,
                phone_number: dto.phone_number,
                gender: dto.gender,
                role,
                is_verified: false,
            })
            .await?;

        let token = state.tokens.issue_purpose_token(
            &user.email,
            TokenPurpose::EmailVerification,
            Utc::now() + Duration::seconds(state.jwt_config.verification_token_expiry),
        )?;

        let email_service = state.email.clone();
        let (to, name) = (user.email.clone(), user.first_name.clone());
        tokio::spawn(async move {
            if let Err(e) = email_service.send_verification_email(&to, &name, &token).await {
                error!(error = %e, "Failed to send verification email");
            }
        });

        info!(user_uid = %user.uid, role = %role, "User signed up");

        Ok(user)
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = state
            .users
            .find_by_email(&normalize_email(&dto.email))
            .await?
            .ok_or_else(AppError::invalid_email_or_password)?;

        if !verify_password(&dto.password, &user.hashed_password)? {
            return Err(AppError::invalid_email_or_password());
        }

        let subject = TokenSubject::new(user.email.clone(), user.uid.to_string());
        let now = Utc::now();

        let access_token = state.tokens.issue(
            &subject.clone().with_role(user.role.clone()),
            now + Duration::seconds(state.jwt_config.access_token_expiry),
            false,
        )?;
        let refresh_token = state.tokens.issue(
            &subject,
            now + Duration::seconds(state.jwt_config.refresh_token_expiry),
            true,
        )?;

        info!(user_uid = %user.uid, "User logged in");

        Ok(LoginResponse {
            message: "User logged in successfully".to_string(),
            access_token,
            refresh_token,
            user: LoginUser {
                email: user.email,
                user_uid: user.uid.to_string(),
            },
        })
    }

    /// New access token for a refresh token. The role is read from the account, not the token.
    #[instrument(skip(state, claims), fields(jti = %claims.jti))]
    pub async fn refresh(state: &AppState, claims: Claims) -> Result<RefreshResponse, AppError> {
        let now = Utc::now();
        if claims.exp <= now.timestamp() {
            return Err(AppError::invalid_token());
        }

        let user = state
            .users
            .find_by_email(&claims.user.email)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        let subject = TokenSubject::new(user.email, user.uid.to_string()).with_role(user.role);
        let access_token = state.tokens.issue(
            &subject,
            now + Duration::seconds(state.jwt_config.access_token_expiry),
            false,
        )?;

        Ok(RefreshResponse { access_token })
    }

    #[instrument(skip(state, claims), fields(jti = %claims.jti))]
    pub async fn logout(state: &AppState, claims: Claims) -> Result<(), AppError> {
        state
            .revocations
            .revoke(&claims.jti, remaining_lifetime(claims.exp))
            .await?;

        info!("User logged out");
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn verify_email(state: &AppState, token: &str) -> Result<MessageResponse, AppError> {
        let claims = state
            .tokens
            .decode_purpose_token(token, TokenPurpose::EmailVerification)
            .map_err(link_token_rejection)?;

        if state.revocations.is_revoked(&claims.jti).await? {
            return Err(AppError::invalid_link_token());
        }

        if !state.users.mark_verified(&claims.email).await? {
            return Err(AppError::user_not_found());
        }

        state
            .revocations
            .revoke(&claims.jti, remaining_lifetime(claims.exp))
            .await?;

        info!(email = %claims.email, "Email verified");

        Ok(MessageResponse::new("Account verified successfully"))
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn request_password_reset(
        state: &AppState,
        dto: PasswordResetRequest,
    ) -> Result<MessageResponse, AppError> {
        let email = normalize_email(&dto.email);

        if let Some(user) = state.users.find_by_email(&email).await? {
            let token = state.tokens.issue_purpose_token(
                &user.email,
                TokenPurpose::PasswordReset,
                Utc::now() + Duration::seconds(state.jwt_config.reset_token_expiry),
            )?;

            let email_service = state.email.clone();
            tokio::spawn(async move {
                if let Err(e) = email_service
                    .send_password_reset_email(&user.email, &user.first_name, &token)
                    .await
                {
                    error!(error = %e, "Failed to send password reset email");
                }
            });
        }

        Ok(MessageResponse::new(PASSWORD_RESET_REQUESTED))
    }

    #[instrument(skip_all)]
    pub async fn confirm_password_reset(
        state: &AppState,
        token: &str,
        dto: PasswordResetConfirm,
    ) -> Result<MessageResponse, AppError> {
        if dto.new_password != dto.confirm_new_password {
            return Err(AppError::bad_request(anyhow!("Passwords do not match")));
        }

        let claims = state
            .tokens
            .decode_purpose_token(token, TokenPurpose::PasswordReset)
            .map_err(link_token_rejection)?;

        if state.revocations.is_revoked(&claims.jti).await? {
            return Err(AppError::invalid_link_token());
        }

        let user = state
            .users
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        let hashed_password = hash_password(&dto.new_password)?;
        if !state
            .users
            .update_password(&user.email, &hashed_password)
            .await?
        {
            return Err(AppError::user_not_found());
        }

        state
            .revocations
            .revoke(&claims.jti, remaining_lifetime(claims.exp))
            .await?;

        let email_service = state.email.clone();
        tokio::spawn(async move {
            if let Err(e) = email_service
                .send_password_reset_confirmation(&user.email, &user.first_name)
                .await
            {
                error!(error = %e, "Failed to send password reset confirmation");
            }
        });

        info!(email = %claims.email, "Password reset");

        Ok(MessageResponse::new("Password reset successfully"))
    }
}
