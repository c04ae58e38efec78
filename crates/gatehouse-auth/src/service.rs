//! Login, logout, and validate orchestration.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_entity::user::Credentials;

use crate::aggregate::Auth;
use crate::jwt::TokenCodec;
use crate::password::PasswordHasher;
use crate::traits::{RevocationLedger, UserDirectory};

/// Drives the login/logout/validate protocol over the collaborator traits.
#[derive(Clone)]
pub struct AuthService {
    /// User lookup collaborator.
    users: Arc<dyn UserDirectory>,
    /// Revocation ledger collaborator.
    ledger: Arc<dyn RevocationLedger>,
    /// Credential verifier.
    hasher: Arc<PasswordHasher>,
    /// Token codec.
    codec: Arc<TokenCodec>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("codec", &self.codec)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        ledger: Arc<dyn RevocationLedger>,
        hasher: Arc<PasswordHasher>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            users,
            ledger,
            hasher,
            codec,
        }
    }

    /// Authenticates the given credentials and returns a populated aggregate.
    ///
    /// Empty password or email is rejected before any store round-trip; an
    /// unknown email propagates the lookup's not-found error verbatim.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<Auth> {
        if credentials.password.is_empty() {
            return Err(AppError::validation("password is empty"));
        }
        if credentials.email.is_empty() {
            return Err(AppError::validation("email is empty"));
        }

        let user = self.users.find_by_email(&credentials.email).await?;

        let mut auth = Auth::new();
        auth.authenticate(&user, &credentials.password, &self.hasher, &self.codec)?;

        info!(user_id = %user.id, "Login successful");
        Ok(auth)
    }

    /// Revokes the aggregate's token and clears its in-memory state.
    ///
    /// The ledger insert happens first; only a clean durable write permits
    /// clearing the aggregate, so a failed insert leaves the caller visibly
    /// logged in.
    pub async fn logout(&self, auth: &mut Auth) -> AppResult<()> {
        if auth.auth_token.is_empty() {
            return Err(AppError::validation("token is empty"));
        }

        self.ledger.insert(&auth.auth_token).await?;
        auth.invalidate();

        info!("Logout successful");
        Ok(())
    }

    /// Decodes the aggregate's token back into a session and resolves the
    /// owning user.
    ///
    /// Revoked tokens are rejected even when their signature and validity
    /// window still check out.
    pub async fn validate(&self, auth: &mut Auth) -> AppResult<()> {
        if auth.auth_token.is_empty() {
            return Err(AppError::validation("token is empty"));
        }

        auth.load_session(&self.codec)?;

        if self.ledger.is_revoked(&auth.auth_token).await? {
            return Err(AppError::authentication("token has been revoked"));
        }

        let profile_id = match &auth.session {
            Some(session) => session.profile_id.clone(),
            None => return Err(AppError::internal("session missing after load")),
        };
        let id = Uuid::parse_str(&profile_id)
            .map_err(|_| AppError::authentication("invalid or expired token"))?;

        let user = self.users.find_by_id(id).await?;
        auth.user = Some(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    use gatehouse_core::config::auth::AuthConfig;
    use gatehouse_core::error::ErrorKind;
    use gatehouse_entity::blacklist::Blacklist;
    use gatehouse_entity::user::{Role, User};

    /// Fixed-content user directory.
    struct InMemoryDirectory {
        users: Vec<User>,
    }

    #[async_trait]
    impl UserDirectory for InMemoryDirectory {
        async fn find_by_email(&self, email: &str) -> AppResult<User> {
            self.users
                .iter()
                .find(|u| u.email == email)
                .cloned()
                .ok_or_else(|| AppError::not_found(format!("user with email '{email}' not found")))
        }

        async fn find_by_id(&self, id: Uuid) -> AppResult<User> {
            self.users
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or_else(|| AppError::not_found(format!("user {id} not found")))
        }
    }

    /// Ledger that records revocations in memory.
    #[derive(Default)]
    struct RecordingLedger {
        revoked: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RevocationLedger for RecordingLedger {
        async fn insert(&self, auth_token: &str) -> AppResult<Blacklist> {
            self.revoked.lock().unwrap().push(auth_token.to_string());
            let now = Utc::now();
            Ok(Blacklist {
                id: Uuid::new_v4(),
                auth_token: auth_token.to_string(),
                created_at: now,
                updated_at: now,
            })
        }

        async fn is_revoked(&self, auth_token: &str) -> AppResult<bool> {
            Ok(self
                .revoked
                .lock()
                .unwrap()
                .iter()
                .any(|t| t == auth_token))
        }
    }

    /// Ledger whose writes always fail.
    struct FailingLedger;

    #[async_trait]
    impl RevocationLedger for FailingLedger {
        async fn insert(&self, _auth_token: &str) -> AppResult<Blacklist> {
            Err(AppError::database("blacklist insert failed"))
        }

        async fn is_revoked(&self, _auth_token: &str) -> AppResult<bool> {
            Ok(false)
        }
    }

    fn test_user(hasher: &PasswordHasher, email: &str, password: &str, role: Role) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: email.split('@').next().unwrap().to_string(),
            email: email.to_string(),
            password_hash: hasher.hash(password).unwrap(),
            first_name: None,
            last_name: None,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    fn service_with(users: Vec<User>, ledger: Arc<dyn RevocationLedger>) -> AuthService {
        let codec = Arc::new(TokenCodec::new(&AuthConfig {
            jwt_secret: "service-test-secret".to_string(),
            ..AuthConfig::default()
        }));
        AuthService::new(
            Arc::new(InMemoryDirectory { users }),
            ledger,
            Arc::new(PasswordHasher::new()),
            codec,
        )
    }

    #[tokio::test]
    async fn test_login_then_validate_resolves_the_same_user() {
        let hasher = PasswordHasher::new();
        let user = test_user(&hasher, "a@x.com", "p", Role::Admin);
        let user_id = user.id;
        let service = service_with(vec![user], Arc::new(RecordingLedger::default()));

        let auth = service
            .login(&Credentials::new("a@x.com", "p"))
            .await
            .unwrap();
        assert!(!auth.auth_token.is_empty());
        assert_eq!(auth.session.as_ref().unwrap().role, Some(Role::Admin));

        let mut inbound = Auth::with_token(auth.auth_token.clone());
        service.validate(&mut inbound).await.unwrap();
        assert_eq!(inbound.user.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn test_login_rejects_empty_password_before_lookup() {
        let service = service_with(vec![], Arc::new(RecordingLedger::default()));
        let err = service
            .login(&Credentials::new("a@x.com", ""))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_login_rejects_empty_email_before_lookup() {
        let service = service_with(vec![], Arc::new(RecordingLedger::default()));
        let err = service.login(&Credentials::new("", "p")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_login_propagates_unknown_email_verbatim() {
        let service = service_with(vec![], Arc::new(RecordingLedger::default()));
        let err = service
            .login(&Credentials::new("nobody@x.com", "p"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails_closed() {
        let hasher = PasswordHasher::new();
        let user = test_user(&hasher, "a@x.com", "p", Role::Member);
        let service = service_with(vec![user], Arc::new(RecordingLedger::default()));

        let err = service
            .login(&Credentials::new("a@x.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_logout_clears_state_and_records_the_token() {
        let hasher = PasswordHasher::new();
        let user = test_user(&hasher, "a@x.com", "p", Role::Member);
        let ledger = Arc::new(RecordingLedger::default());
        let service = service_with(vec![user], ledger.clone() as Arc<dyn RevocationLedger>);

        let mut auth = service
            .login(&Credentials::new("a@x.com", "p"))
            .await
            .unwrap();
        let token = auth.auth_token.clone();

        service.logout(&mut auth).await.unwrap();
        assert!(auth.auth_token.is_empty());
        assert!(auth.user.is_none());
        assert!(auth.session.is_none());
        assert!(ledger.is_revoked(&token).await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_on_anonymous_aggregate_is_rejected() {
        let service = service_with(vec![], Arc::new(RecordingLedger::default()));
        let mut auth = Auth::new();
        let err = service.logout(&mut auth).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_failed_ledger_write_aborts_invalidation() {
        let hasher = PasswordHasher::new();
        let user = test_user(&hasher, "a@x.com", "p", Role::Member);
        let service = service_with(vec![user], Arc::new(FailingLedger));

        let mut auth = service
            .login(&Credentials::new("a@x.com", "p"))
            .await
            .unwrap();

        let err = service.logout(&mut auth).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        // The aggregate must still look logged in.
        assert!(auth.is_authenticated());
        assert!(auth.user.is_some());
        assert!(auth.session.is_some());
    }

    #[tokio::test]
    async fn test_validate_rejects_revoked_tokens() {
        let hasher = PasswordHasher::new();
        let user = test_user(&hasher, "a@x.com", "p", Role::Member);
        let ledger = Arc::new(RecordingLedger::default());
        let service = service_with(vec![user], ledger.clone() as Arc<dyn RevocationLedger>);

        let mut auth = service
            .login(&Credentials::new("a@x.com", "p"))
            .await
            .unwrap();
        let token = auth.auth_token.clone();
        service.logout(&mut auth).await.unwrap();

        let mut inbound = Auth::with_token(token);
        let err = service.validate(&mut inbound).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_validate_rejects_empty_token() {
        let service = service_with(vec![], Arc::new(RecordingLedger::default()));
        let mut auth = Auth::new();
        let err = service.validate(&mut auth).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_validate_rejects_tampered_tokens() {
        let hasher = PasswordHasher::new();
        let user = test_user(&hasher, "a@x.com", "p", Role::Member);
        let service = service_with(vec![user], Arc::new(RecordingLedger::default()));

        let auth = service
            .login(&Credentials::new("a@x.com", "p"))
            .await
            .unwrap();
        let mut tampered = auth.auth_token.clone();
        tampered.push('x');

        let mut inbound = Auth::with_token(tampered);
        let err = service.validate(&mut inbound).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
