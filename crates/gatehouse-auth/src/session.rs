//! In-memory session — who is acting, with what role.

use serde::{Deserialize, Serialize};

use gatehouse_entity::user::Role;

use crate::error::AuthError;
use crate::jwt::{Claims, TokenCodec};

/// The (profile, role) pair derived from either a live login or a decoded
/// token.
///
/// Lives only in memory for the duration of a request or an in-process auth
/// aggregate; never independently persisted. A `None` role can only come
/// from a decoded token that never carried one — such a session satisfies no
/// role gate and cannot mint a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The owning profile's ID.
    pub profile_id: String,
    /// Role at session creation time.
    pub role: Option<Role>,
}

impl Session {
    /// Creates a session for the given profile and role. Pure construction;
    /// callers guarantee the inputs.
    pub fn new(profile_id: impl Into<String>, role: Role) -> Self {
        Self {
            profile_id: profile_id.into(),
            role: Some(role),
        }
    }

    /// Recovers a session from a signed token.
    pub fn from_token(codec: &TokenCodec, token: &str) -> Result<Self, AuthError> {
        codec.decode(token).map(Self::from)
    }

    /// Signs this session into a bearer token.
    pub fn issue_token(&self, codec: &TokenCodec) -> Result<String, AuthError> {
        codec.encode(self)
    }
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            profile_id: claims.sub,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_core::config::auth::AuthConfig;

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            jwt_secret: "session-test-secret".to_string(),
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_issue_and_recover() {
        let codec = codec();
        let session = Session::new("000000000000000000000001", Role::Root);
        let token = session.issue_token(&codec).unwrap();

        let recovered = Session::from_token(&codec, &token).unwrap();
        assert_eq!(recovered, session);
    }

    #[test]
    fn test_from_token_rejects_empty_input() {
        assert_eq!(
            Session::from_token(&codec(), "").unwrap_err(),
            AuthError::EmptyToken
        );
    }

    #[test]
    fn test_from_token_rejects_garbage() {
        assert_eq!(
            Session::from_token(&codec(), "not-a-token").unwrap_err(),
            AuthError::InvalidToken
        );
    }
}
