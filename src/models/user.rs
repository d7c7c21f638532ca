use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// The actor identity handed down by the auth layer. This subsystem never
/// authenticates anyone; it only consults the resolved role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Editor,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl Role {
    /// Admins and editors hold moderation rights.
    pub fn is_moderator(&self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }
}
