/**
 * Registration Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username format, email shape, and password length
 * 2. Check username availability
 * 3. Hash the password
 * 4. Persist the record
 * 5. Return the created user (without the credential hash)
 *
 * # Validation
 *
 * - Username: 3-30 chars, starts with a letter, alphanumeric + underscore
 * - Email must contain '@'
 * - Password must be at least 8 characters
 */

use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;

use crate::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::auth::service::{AuthService, NewRegistration};
use crate::error::ApiError;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid username, email, or password format
/// * `409 Conflict` - username or email already registered
/// * `500 Internal Server Error` - hashing or store failure
pub async fn register(
    State(auth): State<Arc<AuthService>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    tracing::info!(
        "registration request for username: {}, email: {}",
        request.username,
        request.email
    );

    if !is_valid_username(&request.username) {
        tracing::warn!("invalid username format: {}", request.username);
        return Err(ApiError::validation(
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if !request.email.contains('@') {
        tracing::warn!("invalid email format: {}", request.email);
        return Err(ApiError::validation("Invalid email format"));
    }

    if request.password.len() < 8 {
        tracing::warn!("password too short for username: {}", request.username);
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    let created = auth
        .register(NewRegistration {
            name: request.name,
            username: request.username,
            email: request.email,
            password: request.password,
            age: request.age,
            university: request.university,
            school: request.school,
            work: request.work,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}
