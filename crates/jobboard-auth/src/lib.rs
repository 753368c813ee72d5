//! # Jobboard Auth
//!
//! Token handling for the Jobboard API.
//!
//! - [`claims`]: wire claim types for access/refresh and single-purpose tokens
//! - [`jwt`]: [`TokenCodec`], HMAC signing and zero-leeway verification
//! - [`kind`]: [`TokenKind`], access/refresh classification
//!
//! Revocation lives in `jobboard-cache`; this crate never touches a store.

pub mod claims;
pub mod error;
pub mod jwt;
pub mod kind;

pub use claims::{Claims, PurposeClaims, TokenPurpose, TokenSubject};
pub use error::TokenError;
pub use jwt::TokenCodec;
pub use kind::TokenKind;
