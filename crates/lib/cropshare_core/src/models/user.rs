//! User domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An enumerated capability set, not a hierarchy: no role implies
/// another. Each protected route declares the exact set it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    PantryManager,
    Grower,
    RepoManager,
}

impl Role {
    /// Stable wire and database representation (the variant name).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::PantryManager => "PantryManager",
            Role::Grower => "Grower",
            Role::RepoManager => "RepoManager",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role string from the database that matches no known variant.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "PantryManager" => Ok(Role::PantryManager),
            "Grower" => Ok(Role::Grower),
            "RepoManager" => Ok(Role::RepoManager),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A user account as stored in the credential store.
///
/// `username` is unique and lowercased on write. `blocked` may be toggled
/// by an administrator at any time; it takes effect on the user's next
/// guarded request, not retroactively on already-issued tokens. Role is
/// immutable after creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[serde(rename = "isBlocked")]
    pub blocked: bool,
    pub pantry_id: Option<Uuid>,
}
