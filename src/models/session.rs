use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::text;

/// Dashboard role, resolved once from the session payload.
///
/// The backend only distinguishes `"admin"`; every other role string is a
/// reviewer, and so is a blank `Role` cell (`null` or missing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Role {
    Admin,
    #[default]
    Reviewer,
}

impl Role {
    pub fn from_label(label: &str) -> Self {
        if label == "admin" {
            Role::Admin
        } else {
            Role::Reviewer
        }
    }

    /// Whether this role may see every submission, the team list and the team charts
    pub fn sees_team_data(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Reviewer => "Reviewer",
        }
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        Role::from_label(&label)
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text::optional(deserializer)?.map_or(Role::Reviewer, Role::from))
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => "admin".to_string(),
            Role::Reviewer => "reviewer".to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.badge())
    }
}

/// The signed-in user as reported by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, deserialize_with = "text::optional", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of `GET /api/auth/verify`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Body of `POST /api/auth/signin`, success or failure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInResponse {
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Row of `/api/users`. The sheet headers are capitalised there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(alias = "Email", default, deserialize_with = "text::required")]
    pub email: String,
    #[serde(alias = "Role", default, deserialize_with = "text::required")]
    pub role: String,
}

impl TeamMember {
    pub fn is_admin(&self) -> bool {
        Role::from_label(&self.role) == Role::Admin
    }
}
