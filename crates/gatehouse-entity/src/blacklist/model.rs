//! Blacklist entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A token explicitly invalidated by logout.
///
/// Records are insert-only; there is no update path and no expiry sweep.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blacklist {
    /// Unique record identifier.
    pub id: Uuid,
    /// The revoked bearer token, verbatim.
    pub auth_token: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}
