//! Administrative commands. Admin accounts cannot be created through signup.

use anyhow::{Context, bail};
use tracing::info;

use jobboard_core::hash_password;
use jobboard_db::UserRepository;
use jobboard_models::users::{NewUser, User, UserRole, normalize_email};

/// Profile of the admin to create. Optional fields fall back to placeholders.
#[derive(Debug, Clone, Default)]
pub struct AdminDetails {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Creates a verified admin account.
pub async fn create_admin(users: &dyn UserRepository, details: AdminDetails) -> anyhow::Result<User> {
    if details.password.len() < MIN_PASSWORD_LENGTH {
        bail!("Password must be at least {MIN_PASSWORD_LENGTH} characters");
    }

    let email = normalize_email(&details.email);
    if !email.contains('@') {
        bail!("Invalid email address: {email}");
    }

    if users
        .find_by_email(&email)
        .await
        .map_err(|e| e.error)?
        .is_some()
    {
        bail!("User with this email already exists");
    }

    let hashed_password = hash_password(&details.password)
        .map_err(|e| e.error)
        .context("Failed to hash password")?;

    let user = users
        .create(NewUser {
            username: details.username,
            email,
            first_name: details.first_name.unwrap_or_else(|| "Admin".to_string()),
            last_name: details.last_name.unwrap_or_default(),
            hashed_password,
            phone_number: details.phone_number.unwrap_or_default(),
            gender: details.gender.unwrap_or_default(),
            role: UserRole::Admin,
            is_verified: true,
        })
        .await
        .map_err(|e| e.error)?;

    info!(user_uid = %user.uid, "Admin account created");
    Ok(user)
}
