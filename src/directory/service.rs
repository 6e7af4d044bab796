/**
 * User Directory Service
 *
 * CRUD and search over the user store with a cache-aside read path. The
 * full listing and single-id lookups go through the directory cache; every
 * successful write invalidates the listing entry and the affected user's
 * entry, so a read after a write never serves the pre-write result.
 */

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::directory::cache::DirectoryCache;
use crate::users::model::{NewUser, UserRecord, UserUpdate};
use crate::users::store::{StoreError, UserStore};

/// Errors surfaced by directory operations
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No active user with the given id
    #[error("user with id {0} not found")]
    UserNotFound(Uuid),

    /// Create or update collided with an existing username or email
    #[error("user '{0}' already exists")]
    UserAlreadyExists(String),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Requested changes to an existing user
///
/// `password_hash` and `active` are optional; an absent value keeps what the
/// record already holds. Everything else replaces the stored field.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub age: i32,
    pub university: String,
    pub school: String,
    pub work: String,
    pub active: Option<bool>,
}

/// Directory reads and writes with cache coherence
pub struct DirectoryService {
    store: Arc<dyn UserStore>,
    cache: DirectoryCache,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn UserStore>, cache: DirectoryCache) -> Self {
        Self { store, cache }
    }

    /// All active users, cache-aside over the store's full listing.
    pub async fn get_all(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        let users = self
            .cache
            .listing_or_load(|| async { self.store.find_all().await })
            .await?;
        Ok(users)
    }

    /// A single active user by id, cache-aside over the store lookup.
    pub async fn get_by_id(&self, id: Uuid) -> Result<UserRecord, DirectoryError> {
        self.cache
            .record_or_load(id, || async { self.store.find_by_id(id).await })
            .await?
            .ok_or(DirectoryError::UserNotFound(id))
    }

    /// Create a user and invalidate the cached listing
    ///
    /// The record arrives with its credential already hashed; the directory
    /// never sees plaintext passwords.
    pub async fn create(&self, new_user: NewUser) -> Result<UserRecord, DirectoryError> {
        if self
            .store
            .find_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(DirectoryError::UserAlreadyExists(new_user.username));
        }

        let username = new_user.username.clone();
        let created = self.store.create(new_user).await.map_err(|e| match e {
            StoreError::Conflict => DirectoryError::UserAlreadyExists(username),
            other => DirectoryError::Store(other),
        })?;

        self.cache.invalidate_listing();
        tracing::info!("created user: {} ({})", created.username, created.id);
        Ok(created)
    }

    /// Replace a user's mutable fields
    ///
    /// Preserves the original creation timestamp and refreshes the update
    /// timestamp. Invalidates both the listing and the per-id cache entry.
    pub async fn update(&self, id: Uuid, changes: UserChanges) -> Result<UserRecord, DirectoryError> {
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::UserNotFound(id))?;

        let username = changes.username.clone();
        let update = UserUpdate {
            name: changes.name,
            username: changes.username,
            email: changes.email,
            password_hash: changes.password_hash.unwrap_or(existing.password_hash),
            age: changes.age,
            university: changes.university,
            school: changes.school,
            work: changes.work,
            active: changes.active.unwrap_or(existing.active),
        };

        let updated = self.store.update(id, update).await.map_err(|e| match e {
            StoreError::NotFound => DirectoryError::UserNotFound(id),
            StoreError::Conflict => DirectoryError::UserAlreadyExists(username),
            other => DirectoryError::Store(other),
        })?;

        self.cache.invalidate_listing();
        self.cache.invalidate_record(id);
        tracing::info!("updated user: {} ({})", updated.username, updated.id);
        Ok(updated)
    }

    /// Soft-delete a user and invalidate its cache entries.
    pub async fn delete(&self, id: Uuid) -> Result<(), DirectoryError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::UserNotFound(id))?;

        self.store.soft_delete(id).await.map_err(|e| match e {
            StoreError::NotFound => DirectoryError::UserNotFound(id),
            other => DirectoryError::Store(other),
        })?;

        self.cache.invalidate_listing();
        self.cache.invalidate_record(id);
        tracing::info!("soft-deleted user: {}", id);
        Ok(())
    }

    /// Case-insensitive substring search on display name. Uncached.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<UserRecord>, DirectoryError> {
        Ok(self.store.search_by_name(fragment).await?)
    }

    /// Active users at a university. Uncached.
    pub async fn get_by_university(
        &self,
        university: &str,
    ) -> Result<Vec<UserRecord>, DirectoryError> {
        Ok(self.store.find_by_university(university).await?)
    }

    /// Active users within an inclusive age range. Uncached.
    pub async fn get_by_age_range(
        &self,
        min_age: i32,
        max_age: i32,
    ) -> Result<Vec<UserRecord>, DirectoryError> {
        Ok(self.store.find_by_age_range(min_age, max_age).await?)
    }
}
