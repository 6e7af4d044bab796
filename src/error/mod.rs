//! API Error Module
//!
//! Error types for the HTTP boundary and their response conversions.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - ApiError and the status-code table
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Services return their own typed errors (`StoreError`, `AuthError`,
//! `DirectoryError`, `TokenError`); the `From` impls in `types.rs` collapse
//! them onto `ApiError`, whose variant alone determines the HTTP status.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
