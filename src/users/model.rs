/**
 * User Record Model
 *
 * This module defines the persisted user record and the payloads used to
 * create and replace records through the user store.
 */

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// A user record as held by the store
///
/// Records are soft-deleted: `active` is flipped to false instead of the row
/// being removed, and inactive records are excluded from every read path.
/// `id` and `created_at` are fixed at creation; `updated_at` moves on every
/// mutation.
#[derive(Clone, sqlx::FromRow)]
pub struct UserRecord {
    /// Unique user ID (UUID, assigned by the store)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Username (unique across active and inactive records)
    pub username: String,
    /// Email address (unique across active and inactive records)
    pub email: String,
    /// Hashed password (bcrypt); never exposed in responses
    pub password_hash: String,
    /// Age in years
    pub age: i32,
    /// University affiliation
    pub university: String,
    /// School within the university
    pub school: String,
    /// Workplace
    pub work: String,
    /// Soft-delete marker; inactive records are invisible to reads
    pub active: bool,
    /// Created at timestamp (UTC)
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp (UTC)
    pub updated_at: DateTime<Utc>,
}

// Manual Debug so the credential hash cannot leak through logs.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("age", &self.age)
            .field("university", &self.university)
            .field("school", &self.school)
            .field("work", &self.work)
            .field("active", &self.active)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Payload for creating a user
///
/// The store assigns the id and both timestamps and marks the record active.
/// The password arrives here already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub university: String,
    pub school: String,
    pub work: String,
}

/// Fully-resolved replacement of a record's mutable fields
///
/// Everything except `id` and `created_at` is replaced; the store stamps
/// `updated_at` itself.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub university: String,
    pub school: String,
    pub work: String,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = UserRecord {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            age: 24,
            university: "Colombo".to_string(),
            school: "Engineering".to_string(),
            work: "".to_string(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let rendered = format!("{:?}", user);
        assert!(!rendered.contains("$2b$12$secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
