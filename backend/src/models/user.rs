//! Models that represent user accounts and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of a registered learner.
pub struct User {
    pub id: Uuid,
    /// Human-readable name shown in the UI.
    pub display_name: String,
    /// Login identity, unique across the system.
    pub email: String,
    /// Argon2 hash of the user's password.
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::Type, ToSchema, Default)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
/// Supported user roles stored in the database.
pub enum UserRole {
    #[default]
    Student,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Admin => "admin",
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "student" => Ok(UserRole::Student),
            "admin" => Ok(UserRole::Admin),
            // tolerate legacy casings
            "Student" | "STUDENT" => Ok(UserRole::Student),
            "Admin" | "ADMIN" => Ok(UserRole::Admin),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["student", "admin"],
            )),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
/// Payload for creating a new account.
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "crate::validation::rules::validate_password"))]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
/// Credentials submitted by a user attempting to authenticate.
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Bearer token plus user identity returned by signup and login.
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Public-facing representation of a user (credential omitted).
pub struct UserResponse {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            display_name: user.display_name,
            email: user.email,
            role: user.role.as_str().to_string(),
        }
    }
}

impl User {
    /// Constructs a new student account with a freshly generated id.
    pub fn new(display_name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name,
            email,
            password_hash,
            role: UserRole::Student,
            created_at: now,
            updated_at: now,
        }
    }
}
