//! Authentication Module
//!
//! User authentication: credential hashing, session tokens, and the
//! login/registration service, plus the HTTP handlers for the auth
//! endpoints.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs        - Module exports
//! ├── password.rs   - bcrypt hashing and verification
//! ├── sessions.rs   - Session token codec (issue/verify)
//! ├── service.rs    - AuthService (login, register)
//! └── handlers/     - HTTP handlers
//!     ├── mod.rs       - Handler exports
//!     ├── types.rs     - Request/response types
//!     ├── register.rs  - Registration handler
//!     ├── login.rs     - Login handler
//!     └── validate.rs  - Token validation handler
//! ```
//!
//! # Security
//!
//! - Passwords are bcrypt-hashed before storage; plaintext is dropped as
//!   soon as the hash exists and never logged
//! - Session tokens are HMAC-signed JWTs verified with zero clock leeway
//! - Unknown usernames and wrong passwords fail identically

/// Credential hashing
pub mod password;

/// Session token codec
pub mod sessions;

/// Login and registration service
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types
pub use service::{AuthError, AuthService, LoginOutcome, NewRegistration};
pub use sessions::{Claims, IssuedToken, TokenCodec, TokenError};
