/**
 * Login Handler
 *
 * This module implements the authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Issue a signed session token
 * 4. Return token, username, and expiry
 *
 * # Security
 *
 * - An unknown username and a wrong password both return 401 with the same
 *   body, so usernames cannot be enumerated
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::auth::service::AuthService;
use crate::error::ApiError;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown username or wrong password
/// * `500 Internal Server Error` - store or token-issuance failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "Secr3t!pass"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "success": true,
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "username": "alice",
///   "expires_in": 3600000,
///   "message": "Login successful"
/// }
/// ```
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    tracing::info!("login request for: {}", request.username);

    let outcome = auth.login(&request.username, &request.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        token: outcome.token,
        username: outcome.username,
        expires_in: outcome.expires_in_ms,
        message: "Login successful".to_string(),
    }))
}
