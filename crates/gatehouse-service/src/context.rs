//! Request context carrying the authenticated caller's identity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use gatehouse_entity::user::Role;

/// Context for the current authenticated request.
///
/// Built by the authorization middleware from decoded token claims and
/// threaded to handlers as a typed value; downstream code never performs a
/// stringly-keyed context lookup.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated profile's ID.
    pub profile_id: Uuid,
    /// The caller's role at token issuance time.
    pub role: Role,
    /// The raw bearer token this request arrived with.
    pub token: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(profile_id: Uuid, role: Role, token: impl Into<String>) -> Self {
        Self {
            profile_id,
            role,
            token: token.into(),
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller is root.
    pub fn is_root(&self) -> bool {
        self.role.is_root()
    }

    /// Returns whether the caller is at least an admin.
    pub fn is_admin_or_above(&self) -> bool {
        self.role.is_admin_or_above()
    }
}
