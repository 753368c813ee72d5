use crate::claims::Claims;
use crate::error::TokenError;

/// Which kind of token a guard accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn of(claims: &Claims) -> Self {
        if claims.refresh {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        }
    }

    pub fn verify(self, claims: &Claims) -> Result<(), TokenError> {
        if TokenKind::of(claims) == self {
            Ok(())
        } else {
            Err(TokenError::WrongKind { expected: self })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::TokenSubject;

    fn claims(refresh: bool) -> Claims {
        Claims {
            user: TokenSubject::new("a@x.com", "uid"),
            exp: 9999999999,
            iat: 1,
            jti: "jti".to_string(),
            refresh,
        }
    }

    #[test]
    fn test_access_kind_rejects_refresh_token() {
        assert_eq!(
            TokenKind::Access.verify(&claims(true)),
            Err(TokenError::WrongKind {
                expected: TokenKind::Access
            })
        );
        assert!(TokenKind::Access.verify(&claims(false)).is_ok());
    }

    #[test]
    fn test_refresh_kind_rejects_access_token() {
        assert_eq!(
            TokenKind::Refresh.verify(&claims(false)),
            Err(TokenError::WrongKind {
                expected: TokenKind::Refresh
            })
        );
        assert!(TokenKind::Refresh.verify(&claims(true)).is_ok());
    }
}
