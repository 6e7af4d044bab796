//! User Directory Module
//!
//! The user directory: CRUD and search over the user store with a
//! cache-aside read path, plus the HTTP handlers for the directory surface.
//!
//! # Module Structure
//!
//! ```text
//! directory/
//! ├── mod.rs       - Module exports
//! ├── cache.rs     - TTL cache over directory reads
//! ├── service.rs   - DirectoryService (CRUD, search, invalidation)
//! └── handlers.rs  - HTTP handlers for /api/users
//! ```
//!
//! # Cache Coherence
//!
//! The full listing and single-id lookups are cached with a configurable
//! TTL (5 minutes by default). Create invalidates the listing; update and
//! delete invalidate the listing and the affected user's entry. Search and
//! filter queries always read through to the store.

/// TTL cache over directory reads
pub mod cache;

/// Directory service
pub mod service;

/// HTTP handlers for the directory surface
pub mod handlers;

// Re-export commonly used types
pub use cache::{CacheKey, CachedQueryResult, DirectoryCache};
pub use service::{DirectoryError, DirectoryService, UserChanges};
