//! Signing and verification of compact JWS tokens.
//!
//! [`TokenCodec`] is built once from [`JwtConfig`] and shared through application state.
//! It is stateless: revocation is checked by the caller, never here.
//!
//! # Example
//!
//! ```ignore
//! use chrono::{Duration, Utc};
//! use jobboard_auth::{TokenCodec, TokenSubject};
//! use jobboard_config::JwtConfig;
//!
//! let codec = TokenCodec::new(&JwtConfig::from_env())?;
//! let subject = TokenSubject::new("a@x.com", user_uid.to_string()).with_role("user");
//!
//! let token = codec.issue(&subject, Utc::now() + Duration::hours(1), false)?;
//! let claims = codec.decode(&token)?;
//! ```

use std::str::FromStr;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Deserialize;
use uuid::Uuid;

use jobboard_config::JwtConfig;

use crate::claims::{Claims, PurposeClaims, TokenPurpose, TokenSubject};
use crate::error::TokenError;

/// Claims as found on the wire, before `jti` presence is checked.
#[derive(Deserialize)]
struct RawClaims {
    user: TokenSubject,
    exp: i64,
    iat: i64,
    jti: Option<String>,
    refresh: bool,
}

#[derive(Deserialize)]
struct RawPurposeClaims {
    email: String,
    purpose: TokenPurpose,
    exp: i64,
    iat: i64,
    jti: Option<String>,
}

#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Builds a codec for the configured HMAC algorithm.
    ///
    /// # Errors
    ///
    /// [`TokenError::UnsupportedAlgorithm`] for anything outside HS256/HS384/HS512.
    pub fn new(config: &JwtConfig) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(config.algorithm.trim())
            .map_err(|_| TokenError::UnsupportedAlgorithm(config.algorithm.clone()))?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm(config.algorithm.clone()));
        }

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Signs `{user, iat=now, exp, jti, refresh}` and returns the compact token.
    pub fn issue(
        &self,
        subject: &TokenSubject,
        expires_at: DateTime<Utc>,
        refresh: bool,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            user: subject.clone(),
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4().to_string(),
            refresh,
        };

        self.sign(&claims)
    }

    /// Verifies signature and expiry (zero leeway) and returns the full claim set.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let raw = decode::<RawClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?
            .claims;

        let jti = raw.jti.ok_or(TokenError::MissingTokenId)?;

        Ok(Claims {
            user: raw.user,
            exp: raw.exp,
            iat: raw.iat,
            jti,
            refresh: raw.refresh,
        })
    }

    pub fn issue_purpose_token(
        &self,
        email: &str,
        purpose: TokenPurpose,
        expires_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = PurposeClaims {
            email: email.to_string(),
            purpose,
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        self.sign(&claims)
    }

    /// Decodes a single-purpose token, rejecting tokens minted for anything else.
    pub fn decode_purpose_token(
        &self,
        token: &str,
        expected: TokenPurpose,
    ) -> Result<PurposeClaims, TokenError> {
        let raw = decode::<RawPurposeClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?
            .claims;

        if raw.purpose != expected {
            return Err(TokenError::WrongPurpose);
        }

        let jti = raw.jti.ok_or(TokenError::MissingTokenId)?;

        Ok(PurposeClaims {
            email: raw.email,
            purpose: raw.purpose,
            exp: raw.exp,
            iat: raw.iat,
            jti,
        })
    }

    fn sign<T: serde::Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
            TokenError::InvalidSignature
        }
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(err.to_string()),
    }
}
