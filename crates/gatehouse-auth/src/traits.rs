//! Narrow collaborator contracts consumed by the auth core.
//!
//! The core reads users and writes revocation records through these traits
//! only; persistence technology stays on the implementing side.

use async_trait::async_trait;
use uuid::Uuid;

use gatehouse_core::result::AppResult;
use gatehouse_entity::blacklist::Blacklist;
use gatehouse_entity::user::User;

/// Read-only user lookup.
///
/// Implementations return `ErrorKind::NotFound` when no user matches; the
/// core never decides persistence semantics.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> AppResult<User>;

    /// Finds a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<User>;
}

/// Durable record of tokens explicitly invalidated by logout.
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Records a revoked token. Implementations reject empty tokens.
    async fn insert(&self, auth_token: &str) -> AppResult<Blacklist>;

    /// Returns whether the given token has been revoked.
    async fn is_revoked(&self, auth_token: &str) -> AppResult<bool>;
}
