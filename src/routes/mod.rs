//! Route Configuration Module
//!
//! HTTP route configuration for the server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports
//! ├── router.rs     - Router assembly (routes + CORS + tracing)
//! └── api_routes.rs - Endpoint tables (public and guarded)
//! ```

/// Main router creation
pub mod router;

/// API endpoint tables
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
