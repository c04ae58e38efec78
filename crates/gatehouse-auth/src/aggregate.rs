//! The per-request auth aggregate: user, session, and issued token.

use chrono::{DateTime, Utc};

use gatehouse_entity::user::User;

use crate::error::AuthError;
use crate::jwt::TokenCodec;
use crate::password::PasswordHasher;
use crate::session::Session;

/// Composes a user reference, a session, and the issued token string.
///
/// Starts anonymous (all fields empty), becomes authenticated through
/// [`Auth::authenticate`] or verified through [`Auth::load_session`] plus a
/// user lookup, and is cleared by [`Auth::invalidate`]. A non-empty
/// `auth_token` always implies `session` is set and was derived from a
/// freshly minted or successfully decoded token.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The authenticated or resolved user, if any.
    pub user: Option<User>,
    /// The issued or inbound bearer token; empty until minted or attached.
    pub auth_token: String,
    /// The in-memory session, if any.
    pub session: Option<Session>,
    /// When this aggregate was created.
    pub created_at: DateTime<Utc>,
}

impl Auth {
    /// Creates an anonymous aggregate.
    pub fn new() -> Self {
        Self {
            user: None,
            auth_token: String::new(),
            session: None,
            created_at: Utc::now(),
        }
    }

    /// Creates an aggregate carrying an inbound token, for the validate path.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            auth_token: token.into(),
            ..Self::new()
        }
    }

    /// Whether this aggregate currently holds an authenticated identity.
    pub fn is_authenticated(&self) -> bool {
        !self.auth_token.is_empty() && self.session.is_some()
    }

    /// Verifies the candidate secret against the user's stored hash and, on
    /// success, populates the aggregate with the user, a freshly minted
    /// session, and a signed token.
    ///
    /// Runs verify, then session mint, then token mint, short-circuiting on
    /// the first failure; no observable state changes unless every step
    /// succeeds.
    pub fn authenticate(
        &mut self,
        user: &User,
        candidate: &str,
        hasher: &PasswordHasher,
        codec: &TokenCodec,
    ) -> Result<(), AuthError> {
        hasher.verify(&user.password_hash, candidate)?;
        let session = Session::new(user.id.to_string(), user.role);
        let token = session.issue_token(codec)?;

        self.user = Some(user.clone());
        self.session = Some(session);
        self.auth_token = token;
        Ok(())
    }

    /// Clears the token, user, and session. Unconditional and idempotent.
    pub fn invalidate(&mut self) {
        self.auth_token.clear();
        self.user = None;
        self.session = None;
    }

    /// Decodes the carried token into a session. Does not resolve the user.
    pub fn load_session(&mut self, codec: &TokenCodec) -> Result<(), AuthError> {
        if self.auth_token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        self.session = Some(Session::from_token(codec, &self.auth_token)?);
        Ok(())
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gatehouse_core::config::auth::AuthConfig;
    use gatehouse_entity::user::Role;
    use uuid::Uuid;

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            jwt_secret: "aggregate-test-secret".to_string(),
            ..AuthConfig::default()
        })
    }

    fn user_with_password(hasher: &PasswordHasher, password: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            email: "tester@example.com".to_string(),
            password_hash: hasher.hash(password).unwrap(),
            first_name: None,
            last_name: None,
            role: Role::Admin,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_authenticate_populates_everything() {
        let hasher = PasswordHasher::new();
        let codec = codec();
        let user = user_with_password(&hasher, "p");

        let mut auth = Auth::new();
        auth.authenticate(&user, "p", &hasher, &codec).unwrap();

        assert!(auth.is_authenticated());
        assert!(!auth.auth_token.is_empty());
        assert_eq!(auth.user.as_ref().unwrap().id, user.id);
        let session = auth.session.as_ref().unwrap();
        assert_eq!(session.profile_id, user.id.to_string());
        assert_eq!(session.role, Some(Role::Admin));
    }

    #[test]
    fn test_failed_authenticate_leaves_aggregate_unchanged() {
        let hasher = PasswordHasher::new();
        let codec = codec();
        let user = user_with_password(&hasher, "p");

        let mut auth = Auth::new();
        let err = auth
            .authenticate(&user, "wrong", &hasher, &codec)
            .unwrap_err();
        assert_eq!(err, AuthError::PasswordMismatch);
        assert!(auth.user.is_none());
        assert!(auth.session.is_none());
        assert!(auth.auth_token.is_empty());
    }

    #[test]
    fn test_user_without_hash_cannot_authenticate() {
        let hasher = PasswordHasher::new();
        let codec = codec();
        let mut user = user_with_password(&hasher, "p");
        user.password_hash = String::new();

        let mut auth = Auth::new();
        let err = auth.authenticate(&user, "p", &hasher, &codec).unwrap_err();
        assert_eq!(err, AuthError::NoPasswordHash);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_invalidate_is_idempotent() {
        let hasher = PasswordHasher::new();
        let codec = codec();
        let user = user_with_password(&hasher, "p");

        let mut auth = Auth::new();
        auth.authenticate(&user, "p", &hasher, &codec).unwrap();

        auth.invalidate();
        assert!(auth.user.is_none());
        assert!(auth.session.is_none());
        assert!(auth.auth_token.is_empty());

        // A second invalidation yields the same cleared state.
        auth.invalidate();
        assert!(auth.user.is_none());
        assert!(auth.session.is_none());
        assert!(auth.auth_token.is_empty());
    }

    #[test]
    fn test_load_session_requires_a_token() {
        let mut auth = Auth::new();
        assert_eq!(
            auth.load_session(&codec()).unwrap_err(),
            AuthError::EmptyToken
        );
    }

    #[test]
    fn test_load_session_recovers_the_minted_session() {
        let hasher = PasswordHasher::new();
        let codec = codec();
        let user = user_with_password(&hasher, "p");

        let mut auth = Auth::new();
        auth.authenticate(&user, "p", &hasher, &codec).unwrap();
        let minted = auth.session.clone().unwrap();

        // Carry only the token forward, as the validate path does.
        let mut inbound = Auth::with_token(auth.auth_token.clone());
        inbound.load_session(&codec).unwrap();

        assert_eq!(inbound.session.unwrap(), minted);
        assert!(inbound.user.is_none());
    }
}
