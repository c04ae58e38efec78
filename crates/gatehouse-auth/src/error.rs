//! Error classes raised by the authentication core.

use thiserror::Error;

use gatehouse_core::error::AppError;

/// Errors produced by credential verification, token issuance, and token
/// decoding.
///
/// The variants stay distinct inside the crate so callers and tests can tell
/// the failure classes apart; the [`From`] conversion into [`AppError`]
/// collapses them into the single outward "unauthorized" signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No password hash is stored for the identity being verified.
    #[error("no password hash set for this identity")]
    NoPasswordHash,

    /// The candidate secret does not match the stored hash (covers malformed
    /// hash encodings as well).
    #[error("password does not match")]
    PasswordMismatch,

    /// An empty secret cannot be hashed.
    #[error("cannot hash an empty secret")]
    EmptySecret,

    /// The token input was empty.
    #[error("no token provided")]
    EmptyToken,

    /// A token cannot be issued from a session with missing fields. The
    /// message enumerates every missing field.
    #[error("cannot issue a token from an incomplete session: {0}")]
    IncompleteSession(String),

    /// The token's validity window has ended.
    #[error("token has expired")]
    TokenExpired,

    /// The token failed a structural or cryptographic check. Deliberately
    /// opaque: which check failed is not disclosed.
    #[error("invalid token")]
    InvalidToken,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NoPasswordHash | AuthError::PasswordMismatch => {
                AppError::authentication("invalid credentials")
            }
            AuthError::EmptyToken => AppError::authentication("no token provided"),
            AuthError::TokenExpired | AuthError::InvalidToken => {
                AppError::authentication("invalid or expired token")
            }
            AuthError::EmptySecret => AppError::validation("cannot hash an empty secret"),
            AuthError::IncompleteSession(missing) => AppError::validation(format!(
                "cannot issue a token from an incomplete session: {missing}"
            )),
        }
    }
}
