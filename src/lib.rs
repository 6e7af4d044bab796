//! campusdir - User Directory Service
//!
//! campusdir is a user-directory service exposing authentication (login,
//! registration, token validation) and user CRUD/search over a persistent
//! store, with a cache-coherent read path for directory listings.
//!
//! # Overview
//!
//! The library provides:
//! - Password authentication with bcrypt-hashed credentials
//! - Stateless HMAC-signed session tokens with strict expiry
//! - A `UserStore` capability with PostgreSQL and in-memory implementations
//! - A TTL cache over directory reads, invalidated on every write
//! - An Axum HTTP surface for the auth and directory endpoints
//!
//! # Module Structure
//!
//! - **`users`** - User records and the store capability
//!   - Record model, soft-delete semantics
//!   - PostgreSQL store (production) and in-memory store (tests, fallback)
//!
//! - **`auth`** - Authentication
//!   - Credential hashing, session token codec
//!   - Login/registration service and HTTP handlers
//!
//! - **`directory`** - User directory
//!   - Cache-aside reads with write invalidation
//!   - CRUD/search service and HTTP handlers
//!
//! - **`middleware`** - Bearer-token authentication guard
//!
//! - **`error`** - Boundary error type and status mapping
//!
//! - **`routes`**, **`server`** - Router assembly, configuration, state
//!
//! # Usage
//!
//! ```rust,no_run
//! use campusdir::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await;
//! // Serve `app` with axum
//! # Ok(())
//! # }
//! ```

/// User records and persistence
pub mod users;

/// Authentication: hashing, tokens, login/registration
pub mod auth;

/// User directory: cached reads, CRUD, search
pub mod directory;

/// Bearer-token middleware
pub mod middleware;

/// Boundary error types
pub mod error;

/// Route configuration
pub mod routes;

/// Server configuration, state, and assembly
pub mod server;

// Re-export commonly used types
pub use auth::{AuthService, TokenCodec, TokenError};
pub use directory::{DirectoryCache, DirectoryService};
pub use error::ApiError;
pub use server::{create_app, AppConfig, AppState};
pub use users::{InMemoryUserStore, PgUserStore, UserRecord, UserStore};
