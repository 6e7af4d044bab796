/**
 * User Directory Handlers
 *
 * HTTP handlers for the user directory surface. All routes here sit behind
 * the authentication middleware.
 *
 * # Routes
 *
 * - `GET    /api/users`                          - list active users
 * - `GET    /api/users/{id}`                     - get one user
 * - `POST   /api/users`                          - create a user
 * - `PUT    /api/users/{id}`                     - replace a user's fields
 * - `DELETE /api/users/{id}`                     - soft-delete a user
 * - `GET    /api/users/search/name?name=`        - substring search
 * - `GET    /api/users/university/{university}`  - filter by university
 * - `GET    /api/users/age-range?min_age=&max_age=` - filter by age
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::handlers::types::UserResponse;
use crate::auth::password::hash_password;
use crate::directory::service::{DirectoryService, UserChanges};
use crate::error::ApiError;
use crate::users::model::NewUser;

/// Create-user request body
///
/// Carries a plaintext password which is hashed here at the boundary; the
/// directory service only ever sees the finished hash.
#[derive(Deserialize, Debug)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub email: String,
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

/// Update-user request body
///
/// `password` and `active` are optional; omitting them keeps the stored
/// credential hash and active flag.
#[derive(Deserialize, Debug)]
pub struct UpdateUserRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub work: String,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Deserialize, Debug)]
pub struct NameSearchParams {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct AgeRangeParams {
    pub min_age: i32,
    pub max_age: i32,
}

fn to_responses(users: Vec<crate::users::model::UserRecord>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

/// List all active users.
pub async fn list_users(
    State(directory): State<Arc<DirectoryService>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = directory.get_all().await?;
    Ok(Json(to_responses(users)))
}

/// Get one user by id.
pub async fn get_user(
    State(directory): State<Arc<DirectoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = directory.get_by_id(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a user
///
/// # Errors
///
/// * `400 Bad Request` - password shorter than 8 characters
/// * `409 Conflict` - username or email already in use
pub async fn create_user(
    State(directory): State<Arc<DirectoryService>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    tracing::info!("create user request for username: {}", request.username);

    if request.password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let password_hash =
        hash_password(&request.password).map_err(|e| ApiError::internal(e.to_string()))?;

    let created = directory
        .create(NewUser {
            name: request.name,
            username: request.username,
            email: request.email,
            password_hash,
            age: request.age,
            university: request.university,
            school: request.school,
            work: request.work,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// Replace a user's mutable fields. Returns 204 on success.
pub async fn update_user(
    State(directory): State<Arc<DirectoryService>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("update user request for: {}", id);

    let password_hash = match &request.password {
        Some(password) => {
            if password.len() < 8 {
                return Err(ApiError::validation(
                    "Password must be at least 8 characters",
                ));
            }
            Some(hash_password(password).map_err(|e| ApiError::internal(e.to_string()))?)
        }
        None => None,
    };

    directory
        .update(
            id,
            UserChanges {
                name: request.name,
                username: request.username,
                email: request.email,
                password_hash,
                age: request.age,
                university: request.university,
                school: request.school,
                work: request.work,
                active: request.active,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Soft-delete a user. Returns 204 on success.
pub async fn delete_user(
    State(directory): State<Arc<DirectoryService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("delete user request for: {}", id);
    directory.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Case-insensitive substring search on display name.
pub async fn search_users_by_name(
    State(directory): State<Arc<DirectoryService>>,
    Query(params): Query<NameSearchParams>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = directory.search_by_name(&params.name).await?;
    Ok(Json(to_responses(users)))
}

/// Active users at the given university.
pub async fn users_by_university(
    State(directory): State<Arc<DirectoryService>>,
    Path(university): Path<String>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = directory.get_by_university(&university).await?;
    Ok(Json(to_responses(users)))
}

/// Active users within an inclusive age range.
pub async fn users_by_age_range(
    State(directory): State<Arc<DirectoryService>>,
    Query(params): Query<AgeRangeParams>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = directory
        .get_by_age_range(params.min_age, params.max_age)
        .await?;
    Ok(Json(to_responses(users)))
}
