use std::env;

/// Signing key, algorithm and lifetimes for every token the API mints.
///
/// # Environment Variables
///
/// - `JWT_SECRET`: HMAC secret
/// - `JWT_ALGORITHM`: `HS256` (default), `HS384` or `HS512`
/// - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default: 1 hour)
/// - `JWT_REFRESH_EXPIRY`: refresh token lifetime in seconds (default: 2 days)
/// - `JWT_VERIFICATION_EXPIRY`: email verification link lifetime (default: 1 day)
/// - `JWT_RESET_EXPIRY`: password reset link lifetime (default: 1 hour)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    pub verification_token_expiry: i64,
    pub reset_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            algorithm: env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(172800), // 2 days
            verification_token_expiry: env::var("JWT_VERIFICATION_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 1 day
            reset_token_expiry: env::var("JWT_RESET_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
        }
    }
}
