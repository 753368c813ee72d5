use tracing::{info, instrument};
use uuid::Uuid;

use jobboard_core::AppError;
use jobboard_models::users::{UpdateUserDto, User};

use crate::middleware::role::ensure_owner;
use crate::state::AppState;
use crate::utils::ids::parse_uid;

pub struct UserService;

impl UserService {
    #[instrument(skip(state))]
    pub async fn get_users(state: &AppState) -> Result<Vec<User>, AppError> {
        state.users.list().await
    }

    #[instrument(skip(state))]
    pub async fn get_user(state: &AppState, user_uid: &str) -> Result<User, AppError> {
        let uid = parse_uid(user_uid)?;
        state
            .users
            .find_by_id(uid)
            .await?
            .ok_or_else(AppError::user_not_found)
    }

    /// Updates the caller's own profile.
    #[instrument(skip(state, dto))]
    pub async fn update_user(
        state: &AppState,
        caller_uid: Uuid,
        user_uid: &str,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let user = Self::get_user(state, user_uid).await?;
        ensure_owner(caller_uid, user.uid)?;

        let updated = state
            .users
            .update_profile(user.uid, dto)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        info!(user_uid = %updated.uid, "Profile updated");
        Ok(updated)
    }

    /// Deletes the caller's own account. Their jobs and applications go with it.
    #[instrument(skip(state))]
    pub async fn delete_user(
        state: &AppState,
        caller_uid: Uuid,
        user_uid: &str,
    ) -> Result<(), AppError> {
        let user = Self::get_user(state, user_uid).await?;
        ensure_owner(caller_uid, user.uid)?;

        if !state.users.delete(user.uid).await? {
            return Err(AppError::user_not_found());
        }

        info!(user_uid = %user.uid, "Account deleted");
        Ok(())
    }
}
