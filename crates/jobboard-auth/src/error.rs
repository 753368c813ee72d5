use thiserror::Error;

use crate::kind::TokenKind;

/// Failures of the token codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token has no jti")]
    MissingTokenId,

    #[error("Token was issued for a different purpose")]
    WrongPurpose,

    #[error("Expected {expected:?} token")]
    WrongKind { expected: TokenKind },

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to encode token: {0}")]
    Encoding(String),
}
