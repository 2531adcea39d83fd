use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

/// Account role as issued by the backend at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Student,
    Trainer,
    Intern,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Student, Role::Trainer, Role::Intern];

    /// Roles with a dashboard in this client. Admin accounts have none.
    pub const SIGN_IN: [Role; 3] = [Role::Student, Role::Intern, Role::Trainer];

    #[must_use]
    pub fn can_sign_in(self) -> bool {
        Role::SIGN_IN.contains(&self)
    }

    /// Wire representation (`"STUDENT"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Student => "STUDENT",
            Role::Trainer => "TRAINER",
            Role::Intern => "INTERN",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Student => "Student",
            Role::Trainer => "Trainer",
            Role::Intern => "Intern",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| RoleParseError(s.to_owned()))
    }
}

/// The persisted session triplet: bearer token, role and display name.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub role: Role,
    pub name: String,
}

impl Credentials {
    #[must_use]
    pub fn new(token: impl Into<String>, role: Role, name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            role,
            name: name.into(),
        }
    }

    /// First letter of the display name, uppercased, for avatar badges.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

// Keep the token out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("name", &self.name)
            .finish()
    }
}
