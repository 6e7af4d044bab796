//! User Records and Persistence
//!
//! This module holds the user record model and the store capability the
//! services are written against.
//!
//! # Module Structure
//!
//! ```text
//! users/
//! ├── mod.rs       - Module exports
//! ├── model.rs     - UserRecord, NewUser, UserUpdate
//! ├── store.rs     - UserStore trait and StoreError
//! ├── postgres.rs  - Production store over sqlx/PostgreSQL
//! └── memory.rs    - In-memory store (tests, no-database fallback)
//! ```
//!
//! # Soft Deletes
//!
//! Records are never removed. Deleting a user flips its `active` flag, which
//! excludes it from every read and search while keeping its username and
//! email reserved against re-registration.

/// User record model
pub mod model;

/// Store capability trait and errors
pub mod store;

/// PostgreSQL store implementation
pub mod postgres;

/// In-memory store implementation
pub mod memory;

// Re-export commonly used types
pub use memory::InMemoryUserStore;
pub use model::{NewUser, UserRecord, UserUpdate};
pub use postgres::PgUserStore;
pub use store::{StoreError, UserStore};
