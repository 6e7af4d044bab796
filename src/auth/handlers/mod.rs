//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! └── validate.rs  - Token validation handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`validate_token`** - POST /api/auth/validate - Token validation
//!   (behind the auth middleware)

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Token validation handler
pub mod validate;

// Re-export commonly used types
pub use types::{LoginRequest, LoginResponse, RegisterRequest, TokenValidationResponse, UserResponse};

// Re-export handlers
pub use login::login;
pub use register::register;
pub use validate::validate_token;
