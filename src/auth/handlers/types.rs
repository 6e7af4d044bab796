/**
 * Authentication Handler Types
 *
 * Request and response types for the authentication endpoints, plus the
 * user representation shared with the directory handlers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::users::model::UserRecord;

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// Username to authenticate as
    pub username: String,
    /// Password (verified against the stored hash, never stored itself)
    pub password: String,
}

/// Login response
///
/// `expires_in` is the token lifetime in milliseconds, for clients that
/// schedule a re-login before expiry.
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub username: String,
    pub expires_in: i64,
    pub message: String,
}

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Desired username (3-30 chars, letter first, alphanumeric + underscore)
    pub username: String,
    /// Email address
    pub email: String,
    /// Password (hashed before storage)
    pub password: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub work: String,
}

/// Token validation response
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenValidationResponse {
    pub valid: bool,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// User representation safe to return to clients
///
/// Never carries the credential hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub age: i32,
    pub university: String,
    pub school: String,
    pub work: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            username: user.username,
            email: user.email,
            age: user.age,
            university: user.university,
            school: user.school,
            work: user.work,
            active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
