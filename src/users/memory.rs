/**
 * In-Memory User Store
 *
 * `UserStore` implementation over a shared map. The test suite runs against
 * this store, and the server falls back to it when no database is
 * configured, so the service stays usable in development at the cost of
 * losing data on restart.
 *
 * Uniqueness is checked by scanning, which mirrors what the database's
 * unique indexes enforce: username and email collide with any record,
 * active or inactive.
 */

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::users::model::{NewUser, UserRecord, UserUpdate};
use crate::users::store::{StoreError, UserStore};

/// User store held entirely in process memory
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records, active or not. Used by tests.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn sorted_by_creation(mut users: Vec<UserRecord>) -> Vec<UserRecord> {
    users.sort_by_key(|u| (u.created_at, u.id));
    users
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| u.active).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.active && u.username == username)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(sorted_by_creation(
            users.values().filter(|u| u.active).cloned().collect(),
        ))
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;

        // Username and email are reserved by inactive records too.
        let taken = users
            .values()
            .any(|u| u.username == new_user.username || u.email == new_user.email);
        if taken {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: new_user.name,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            age: new_user.age,
            university: new_user.university,
            school: new_user.school,
            work: new_user.work,
            active: true,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }

        let collides = users
            .values()
            .any(|u| u.id != id && (u.username == update.username || u.email == update.email));
        if collides {
            return Err(StoreError::Conflict);
        }

        let record = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.name = update.name;
        record.username = update.username;
        record.email = update.email;
        record.password_hash = update.password_hash;
        record.age = update.age;
        record.university = update.university;
        record.school = update.school;
        record.work = update.work;
        record.active = update.active;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        let record = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        record.active = false;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<UserRecord>, StoreError> {
        let needle = fragment.to_lowercase();
        let users = self.users.read().await;
        Ok(sorted_by_creation(
            users
                .values()
                .filter(|u| u.active && u.name.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_university(&self, university: &str) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(sorted_by_creation(
            users
                .values()
                .filter(|u| u.active && u.university == university)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_age_range(
        &self,
        min_age: i32,
        max_age: i32,
    ) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(sorted_by_creation(
            users
                .values()
                .filter(|u| u.active && u.age >= min_age && u.age <= max_age)
                .cloned()
                .collect(),
        ))
    }
}
