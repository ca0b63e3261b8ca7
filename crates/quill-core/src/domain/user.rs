use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;
use crate::error::DomainError;

/// User entity - a profile mirrored from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
    pub squad: Option<String>,
    pub stack: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl AppUser {
    /// Create a new user with generated ID and timestamps.
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            phone_number: None,
            image_url: None,
            squad: None,
            stack: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// "First Last", the display name used on articles and comments.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Entity for AppUser {
    const KIND: &'static str = "AppUser";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Roles known to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Decadev,
    Editor,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [Self::Decadev, Self::Editor, Self::Admin];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decadev => "Decadev",
            Self::Editor => "Editor",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidArgument(format!("Unknown role '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_first_and_last() {
        let user = AppUser::new("Ada".into(), "Lovelace".into(), "ada@example.com".into());
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("editor".parse::<UserRole>().unwrap(), UserRole::Editor);
        assert!("root".parse::<UserRole>().is_err());
    }
}
