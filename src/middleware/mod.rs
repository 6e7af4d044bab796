//! Request Middleware
//!
//! Middleware applied around route handlers. Currently the bearer-token
//! authentication guard and its handler-side extractor.

/// Bearer-token authentication middleware
pub mod auth;

// Re-export commonly used types
pub use auth::{require_auth, AuthUser, AuthenticatedUser};
