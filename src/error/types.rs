/**
 * API Error Types
 *
 * This module defines the error surface of the HTTP boundary. Every service
 * error converts into an `ApiError`, and the variant alone decides the
 * response status; handlers never pick status codes ad hoc.
 *
 * # Error Categories
 *
 * - `NotFound` - lookup misses (user by id, user by username)
 * - `Conflict` - duplicate username or email on create/update
 * - `AuthenticationFailed` - bad credentials, deliberately undifferentiated
 * - `Token` - malformed, forged, or expired session tokens
 * - `Validation` - malformed request input, rejected before the services
 * - `Internal` - wrapped backend failures; logged, never exposed
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::auth::service::AuthError;
use crate::auth::sessions::TokenError;
use crate::directory::service::DirectoryError;
use crate::users::store::StoreError;

/// Boundary-facing error with a fixed status mapping
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// The request conflicts with existing state
    #[error("{message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Credentials did not verify; no detail on which part failed
    #[error("invalid username or password")]
    AuthenticationFailed,

    /// A session token failed verification
    #[error("invalid session token: {0}")]
    Token(#[from] TokenError),

    /// The request body or parameters failed validation
    #[error("{message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// An unexpected internal failure; the detail stays in the logs
    #[error("internal server error")]
    Internal {
        /// Detail for the log line, not for the response body
        message: String,
    },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The HTTP status for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404
    /// - `Conflict` - 409
    /// - `AuthenticationFailed`, `Token` - 401
    /// - `Validation` - 400
    /// - `Internal` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message exposed in the response body
    ///
    /// Internal failures return a fixed message; their detail is only
    /// logged at conversion time.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal { .. } => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::not_found("user not found"),
            StoreError::Conflict => ApiError::conflict("username or email already in use"),
            StoreError::Backend(detail) => ApiError::internal(detail),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::AuthenticationFailed,
            AuthError::UserAlreadyExists(username) => {
                ApiError::conflict(format!("user '{}' already exists", username))
            }
            AuthError::Hashing(detail) | AuthError::TokenIssue(detail) => {
                ApiError::internal(detail)
            }
            AuthError::Store(store) => store.into(),
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::UserNotFound(id) => {
                ApiError::not_found(format!("user with id {} not found", id))
            }
            DirectoryError::UserAlreadyExists(username) => {
                ApiError::conflict(format!("user '{}' already exists", username))
            }
            DirectoryError::Store(store) => store.into(),
        }
    }
}
