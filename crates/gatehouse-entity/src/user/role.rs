//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the authorization hierarchy.
///
/// Roles form a total order by privilege level: Root > Admin > Member.
/// The derived `Ord` follows declaration order, so `Role::Member <
/// Role::Admin < Role::Root` holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordinary authenticated member.
    Member,
    /// Can administer users within the tenant.
    Admin,
    /// Full system operator.
    Root,
}

impl Role {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Member => 1,
            Self::Admin => 2,
            Self::Root => 3,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &Role) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check whether `actual` meets the `required` minimum role.
    ///
    /// An absent role never satisfies any requirement, including Member.
    pub fn satisfies(required: Role, actual: Option<Role>) -> bool {
        actual.is_some_and(|role| role.has_at_least(&required))
    }

    /// Check if this role is root.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// Check if this role is an admin or higher.
    pub fn is_admin_or_above(&self) -> bool {
        self.has_at_least(&Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Root => "root",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = gatehouse_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            "root" => Ok(Self::Root),
            _ => Err(gatehouse_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: member, admin, root"
            ))),
        }
    }
}
