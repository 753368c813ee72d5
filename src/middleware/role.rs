//! Role gate.
//!
//! Each protected route names its allowed roles through an extractor type generated by
//! [`require_roles!`](crate::require_roles). Ownership checks are separate and live in the
//! handlers.

use uuid::Uuid;

use jobboard_core::AppError;
use jobboard_models::users::{User, UserRole};

/// Passes iff the account is verified and its role (case-insensitive) is in `allowed`.
pub fn authorize(user: &User, allowed: &[UserRole]) -> Result<(), AppError> {
    if !user.is_verified {
        return Err(AppError::account_not_verified());
    }

    if UserRole::parse(&user.role).is_some_and(|role| allowed.contains(&role)) {
        Ok(())
    } else {
        Err(AppError::role_check_access())
    }
}

/// Declares an extractor yielding the current user once it passes [`authorize`].
#[macro_export]
macro_rules! require_roles {
    ($(#[$meta:meta])* $name:ident, [$($role:expr),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub jobboard_models::users::User);

        impl $name {
            pub const ROLES: &'static [jobboard_models::users::UserRole] = &[$($role),+];
        }

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = jobboard_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let $crate::middleware::auth::CurrentUser(user) =
                    <$crate::middleware::auth::CurrentUser as axum::extract::FromRequestParts<
                        $crate::state::AppState,
                    >>::from_request_parts(parts, state)
                    .await?;

                $crate::middleware::role::authorize(&user, Self::ROLES)?;

                Ok($name(user))
            }
        }
    };
}

require_roles!(
    /// Any verified account. Covers `/auth/me` and `GET /users` as well as job reads; those
    /// two routes are not narrowed per role.
    GeneralRole,
    [UserRole::User, UserRole::Employer, UserRole::Admin]
);
require_roles!(JobListingRole, [UserRole::Employer, UserRole::Admin]);
require_roles!(ApplicantRole, [UserRole::User]);

/// Owner check for resources with an owner column.
pub fn ensure_owner(caller_uid: Uuid, owner_uid: Uuid) -> Result<(), AppError> {
    if caller_uid == owner_uid {
        Ok(())
    } else {
        Err(AppError::not_authorized())
    }
}
