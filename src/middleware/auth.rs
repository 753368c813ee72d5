use std::time::Duration;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use jobboard_auth::{Claims, TokenError, TokenKind};
use jobboard_core::AppError;
use jobboard_models::users::User;

use crate::state::AppState;

/// Bearer token from the `Authorization` header.
pub fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(AppError::missing_credentials)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(AppError::missing_credentials)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::missing_credentials());
    }

    Ok(token)
}

pub fn token_rejection(err: TokenError) -> AppError {
    match err {
        TokenError::MissingTokenId => AppError::token_expired(),
        TokenError::WrongKind {
            expected: TokenKind::Access,
        } => AppError::access_token_required(),
        TokenError::WrongKind {
            expected: TokenKind::Refresh,
        } => AppError::refresh_token_required(),
        _ => AppError::invalid_token(),
    }
}

/// Rejection for verification and reset link tokens. Every failure is a 400.
pub fn link_token_rejection(err: TokenError) -> AppError {
    debug!(error = %err, "Link token rejected");
    AppError::invalid_link_token()
}

/// Decodes `token`, rejects revoked identifiers and checks it is a `kind` token.
///
/// A revocation store failure is an internal error; the request is never let through.
pub async fn verify_token(
    state: &AppState,
    token: &str,
    kind: TokenKind,
) -> Result<Claims, AppError> {
    let claims = state.tokens.decode(token).map_err(|err| {
        debug!(error = %err, "Token rejected");
        token_rejection(err)
    })?;

    if state.revocations.is_revoked(&claims.jti).await? {
        debug!(jti = %claims.jti, "Revoked token presented");
        return Err(AppError::invalid_token());
    }

    kind.verify(&claims).map_err(token_rejection)?;

    Ok(claims)
}

/// Time left until `exp`, plus one second so the revocation outlives the token.
pub fn remaining_lifetime(exp: i64) -> Duration {
    let remaining = exp.saturating_sub(Utc::now().timestamp()).max(0) as u64;
    Duration::from_secs(remaining + 1)
}

/// Claims of a valid, unrevoked access token.
#[derive(Debug, Clone)]
pub struct AccessClaims(pub Claims);

impl AccessClaims {
    /// Account id carried in the token.
    pub fn user_uid(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.user.user_uid).map_err(|_| AppError::invalid_token())
    }
}

impl FromRequestParts<AppState> for AccessClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(state, token, TokenKind::Access).await?;
        Ok(AccessClaims(claims))
    }
}

/// Claims of a valid, unrevoked refresh token.
#[derive(Debug, Clone)]
pub struct RefreshClaims(pub Claims);

impl FromRequestParts<AppState> for RefreshClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(state, token, TokenKind::Refresh).await?;
        Ok(RefreshClaims(claims))
    }
}

/// Loads the account named by an access token. Looked up on every request.
pub async fn resolve_user(state: &AppState, claims: &Claims) -> Result<User, AppError> {
    state
        .users
        .find_by_email(&claims.user.email)
        .await?
        .ok_or_else(AppError::user_not_found)
}

/// The account behind the presented access token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AccessClaims(claims) = AccessClaims::from_request_parts(parts, state).await?;
        let user = resolve_user(state, &claims).await?;
        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use jobboard_core::ErrorKind;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc.def"))).unwrap(), "abc.def");
        assert_eq!(bearer_token(&parts(Some("bearer abc.def"))).unwrap(), "abc.def");
    }

    #[test]
    fn test_missing_or_non_bearer_header() {
        for header in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer "), Some("abc.def")] {
            let err = bearer_token(&parts(header)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::MissingCredentials);
        }
    }

    #[test]
    fn test_token_rejection_mapping() {
        assert_eq!(
            token_rejection(TokenError::MissingTokenId).kind,
            ErrorKind::TokenExpired
        );
        assert_eq!(
            token_rejection(TokenError::Expired).kind,
            ErrorKind::InvalidToken
        );
        assert_eq!(
            token_rejection(TokenError::InvalidSignature).kind,
            ErrorKind::InvalidToken
        );
        assert_eq!(
            token_rejection(TokenError::WrongKind {
                expected: TokenKind::Access
            })
            .kind,
            ErrorKind::AccessTokenRequired
        );
        assert_eq!(
            token_rejection(TokenError::WrongKind {
                expected: TokenKind::Refresh
            })
            .kind,
            ErrorKind::RefreshTokenRequired
        );
    }

    #[test]
    fn test_remaining_lifetime_adds_a_second() {
        let exp = Utc::now().timestamp() + 100;
        let ttl = remaining_lifetime(exp);
        assert!(ttl.as_secs() >= 100 && ttl.as_secs() <= 101);

        assert_eq!(remaining_lifetime(0), Duration::from_secs(1));
    }
}
