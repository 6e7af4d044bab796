/**
 * Token Validation Handler
 *
 * Handler for POST /api/auth/validate. The route sits behind the
 * authentication middleware, so reaching the handler already means the
 * token verified and its subject resolves to an active user; the handler
 * just echoes the verified claims back.
 */

use axum::response::Json;

use crate::auth::handlers::types::TokenValidationResponse;
use crate::middleware::auth::AuthUser;

/// Token validation handler
///
/// # Example Response
///
/// ```json
/// {
///   "valid": true,
///   "username": "alice",
///   "expires_at": "2026-08-07T12:34:56Z"
/// }
/// ```
pub async fn validate_token(AuthUser(user): AuthUser) -> Json<TokenValidationResponse> {
    Json(TokenValidationResponse {
        valid: true,
        username: user.username,
        expires_at: user.expires_at,
    })
}
