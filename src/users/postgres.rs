/**
 * PostgreSQL User Store
 *
 * Production implementation of the `UserStore` capability over a sqlx
 * connection pool. Uniqueness of username and email is enforced by the
 * database's unique indexes (see migrations/0001_create_users.sql) and
 * surfaced as a typed `Conflict`.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::users::model::{NewUser, UserRecord, UserUpdate};
use crate::users::store::{StoreError, UserStore};

const ALL_COLUMNS: &str = "id, name, username, email, password_hash, age, university, school, work, active, created_at, updated_at";

/// User store backed by PostgreSQL
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error to the store taxonomy
///
/// Unique-index violations become `Conflict`; anything else is logged here
/// and wrapped so callers only see an opaque backend failure.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict;
        }
    }
    tracing::error!("database error: {:?}", err);
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {ALL_COLUMNS} FROM users WHERE id = $1 AND active = TRUE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {ALL_COLUMNS} FROM users WHERE username = $1 AND active = TRUE"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {ALL_COLUMNS} FROM users WHERE active = TRUE ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (id, name, username, email, password_hash, age, university, school, work, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, $10, $10)
            RETURNING {ALL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&new_user.name)
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.age)
        .bind(&new_user.university)
        .bind(&new_user.school)
        .bind(&new_user.work)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<UserRecord, StoreError> {
        let now = Utc::now();

        sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            UPDATE users
            SET name = $1, username = $2, email = $3, password_hash = $4,
                age = $5, university = $6, school = $7, work = $8,
                active = $9, updated_at = $10
            WHERE id = $11
            RETURNING {ALL_COLUMNS}
            "#
        ))
        .bind(&update.name)
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.password_hash)
        .bind(update.age)
        .bind(&update.university)
        .bind(&update.school)
        .bind(&update.work)
        .bind(update.active)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(StoreError::NotFound)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE users SET active = FALSE, updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {ALL_COLUMNS} FROM users
            WHERE active = TRUE AND name ILIKE '%' || $1 || '%'
            ORDER BY created_at
            "#
        ))
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_university(&self, university: &str) -> Result<Vec<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {ALL_COLUMNS} FROM users WHERE active = TRUE AND university = $1 ORDER BY created_at"
        ))
        .bind(university)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_age_range(
        &self,
        min_age: i32,
        max_age: i32,
    ) -> Result<Vec<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {ALL_COLUMNS} FROM users WHERE active = TRUE AND age >= $1 AND age <= $2 ORDER BY created_at"
        ))
        .bind(min_age)
        .bind(max_age)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}
