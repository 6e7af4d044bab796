//! Server Module
//!
//! Server initialization and configuration.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── state.rs  - AppState and FromRef implementations
//! ├── config.rs - Configuration loading (env vars, database)
//! └── init.rs   - App assembly
//! ```
//!
//! # Initialization Flow
//!
//! 1. `AppConfig::from_env` - fatal on a missing signing secret
//! 2. `create_app` - store selection, service wiring, router creation

/// Application state management
pub mod state;

/// Configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use init::create_app;
pub use state::AppState;
