//! Token claims payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehouse_entity::user::Role;

/// The signed payload carried inside every bearer token.
///
/// The signature and the temporal fields are the trust boundary; the payload
/// itself is authenticated but not encrypted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the owning profile's ID.
    pub sub: String,
    /// Role at the time of issuance. Absent on tokens that never carried one;
    /// such tokens decode but satisfy no role gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Not-before timestamp (seconds since epoch).
    pub nbf: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
