//! JWT claim structures.
//!
//! - [`Claims`]: access and refresh tokens, discriminated by `refresh`
//! - [`PurposeClaims`]: single-purpose links (email verification, password reset)
//!
//! Wire shape of an access token:
//!
//! ```json
//! {"user": {"email": "a@x.com", "user_uid": "…", "role": "user"},
//!  "exp": 1700003600, "iat": 1700000000, "jti": "…", "refresh": false}
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity claims embedded under `user`.
///
/// Refresh tokens omit `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenSubject {
    pub email: String,
    pub user_uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl TokenSubject {
    pub fn new(email: impl Into<String>, user_uid: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            user_uid: user_uid.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Claims carried by access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: TokenSubject,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
    /// Unique token identifier, the revocation key
    pub jti: String,
    pub refresh: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
}

/// Claims carried by emailed single-purpose tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurposeClaims {
    pub email: String,
    pub purpose: TokenPurpose,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}
