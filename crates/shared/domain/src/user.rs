//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_MODERATOR, ROLE_USER};

/// User roles enumeration.
///
/// Providers that store roles as free text may hand back a value outside
/// the named roles; it is kept as `Unrecognized` rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    #[default]
    User,
    Moderator,
    Admin,
    Unrecognized(String),
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::User => ROLE_USER,
            UserRole::Moderator => ROLE_MODERATOR,
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_USER => UserRole::User,
            ROLE_MODERATOR => UserRole::Moderator,
            ROLE_ADMIN => UserRole::Admin,
            other => UserRole::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::from(s.as_str())
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Unrecognized(raw) => raw,
            named => named.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User record as owned by the capability provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub rating: i32,
}

impl User {
    /// Create a new user with default role and zero rating
    pub fn new(id: String, email: String, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            first_name,
            last_name,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            rating: 0,
        }
    }

    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// User creation input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// User update input; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Password change input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePassword {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!(UserRole::from("user"), UserRole::User);
        assert_eq!(UserRole::from("moderator"), UserRole::Moderator);
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(
            UserRole::from("superuser"),
            UserRole::Unrecognized("superuser".to_string())
        );
    }

    #[test]
    fn test_role_serializes_as_lowercase_string() {
        let json = serde_json::to_string(&UserRole::Moderator).unwrap();
        assert_eq!(json, "\"moderator\"");

        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "1".to_string(),
            "a@b.com".to_string(),
            "Jane".to_string(),
            "Doe".to_string(),
        );
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.rating, 0);
        assert!(!user.is_deleted());
    }
}
