/**
 * User Store Capability
 *
 * This module defines the persistence capability the rest of the service is
 * written against. There is one production implementation over PostgreSQL
 * (`users::postgres`) and an in-memory implementation (`users::memory`) used
 * by the test suite and as the no-database fallback.
 *
 * # Read/Write Semantics
 *
 * Every read operation sees only active records. Writes operate regardless
 * of the active flag, with one exception: `create`'s uniqueness check spans
 * active and inactive records, so a soft-deleted user still reserves its
 * username and email.
 */

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::users::model::{NewUser, UserRecord, UserUpdate};

/// Errors surfaced by a user store
///
/// `NotFound` and `Conflict` are recoverable per-request conditions; any
/// unexpected driver failure is logged at the store and wrapped as `Backend`
/// so callers never see driver internals.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the requested id
    #[error("user not found")]
    NotFound,

    /// Username or email already in use (active or inactive record)
    #[error("username or email already in use")]
    Conflict,

    /// Unexpected failure in the persistence backend
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persistence capability for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up an active record by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Look up an active record by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// All active records, ordered by creation time.
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Insert a new record, assigning id and timestamps.
    ///
    /// Fails with [`StoreError::Conflict`] when the username or email is
    /// already taken by any record, active or not.
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError>;

    /// Replace all mutable fields of the record with the given id.
    ///
    /// `id` and `created_at` are untouched; `updated_at` is set to now.
    /// Fails with [`StoreError::NotFound`] when the id is absent and with
    /// [`StoreError::Conflict`] when the new username or email collides.
    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<UserRecord, StoreError>;

    /// Mark the record inactive.
    ///
    /// Idempotent on an already-inactive record. Fails with
    /// [`StoreError::NotFound`] when the id is absent entirely.
    async fn soft_delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Case-insensitive substring match on display name, active only.
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<UserRecord>, StoreError>;

    /// Active records with the given university.
    async fn find_by_university(&self, university: &str) -> Result<Vec<UserRecord>, StoreError>;

    /// Active records whose age lies in `[min_age, max_age]` inclusive.
    async fn find_by_age_range(&self, min_age: i32, max_age: i32)
        -> Result<Vec<UserRecord>, StoreError>;
}
