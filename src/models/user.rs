//! User model and related types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User roles. The role is chosen at registration and immutable afterwards;
/// no role-change operation exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Full user model from the database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub avatar_color: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "Name cannot be empty."))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    pub password: String,
    pub role: Role,
}
