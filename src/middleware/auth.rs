/**
 * Authentication Middleware
 *
 * Middleware for routes that require a valid session token. It extracts the
 * bearer token from the Authorization header, verifies it, confirms the
 * subject still resolves to an active stored user, and attaches the
 * authenticated identity to the request for handlers to pick up.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::sessions::TokenError;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Identity established by a verified session token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Require a valid bearer token
///
/// This middleware:
/// 1. Extracts the token from the Authorization header
/// 2. Verifies signature and expiry
/// 3. Confirms the subject is still an active user in the store, so tokens
///    of soft-deleted users stop working immediately
/// 4. Attaches [`AuthenticatedUser`] to the request extensions
///
/// Fails with 401 when any of the above does not hold.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("missing Authorization header");
            ApiError::Token(TokenError::Malformed)
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Authorization header is not a bearer token");
        ApiError::Token(TokenError::Malformed)
    })?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::warn!("token rejected: {}", e);
        ApiError::Token(e)
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        tracing::warn!("token subject is not a valid id");
        ApiError::Token(TokenError::Malformed)
    })?;

    let expires_at = claims
        .expires_at()
        .ok_or(ApiError::Token(TokenError::Malformed))?;

    // The token may outlive the account; check the store.
    let known = state.store.find_by_id(user_id).await?;
    if known.is_none() {
        tracing::warn!("token subject {} no longer resolves to an active user", user_id);
        return Err(ApiError::AuthenticationFailed);
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username,
        expires_at,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind [`require_auth`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser missing from request extensions");
                ApiError::AuthenticationFailed
            })?;

        Ok(AuthUser(user))
    }
}
