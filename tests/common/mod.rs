//! Shared test fixtures
//!
//! Builds the service stack over the in-memory store, so integration tests
//! exercise the same wiring as production without needing PostgreSQL.

use std::sync::Arc;
use std::time::Duration;

use campusdir::auth::service::{AuthService, NewRegistration};
use campusdir::auth::sessions::TokenCodec;
use campusdir::directory::cache::DirectoryCache;
use campusdir::directory::service::DirectoryService;
use campusdir::users::memory::InMemoryUserStore;

/// The wired service stack plus direct handles to its collaborators
pub struct TestServices {
    pub store: Arc<InMemoryUserStore>,
    pub tokens: Arc<TokenCodec>,
    pub auth: AuthService,
    pub directory: DirectoryService,
}

/// Build services over a fresh in-memory store
pub fn services() -> TestServices {
    let store = Arc::new(InMemoryUserStore::new());
    let tokens = Arc::new(TokenCodec::new(
        "integration-test-secret",
        Duration::from_secs(3600),
    ));
    let auth = AuthService::new(store.clone(), tokens.clone());
    let directory = DirectoryService::new(store.clone(), DirectoryCache::new(Duration::from_secs(300)));

    TestServices {
        store,
        tokens,
        auth,
        directory,
    }
}

/// A registration payload with sensible defaults
pub fn registration(username: &str, password: &str) -> NewRegistration {
    NewRegistration {
        name: format!("{} Example", username),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: password.to_string(),
        age: 24,
        university: "University of Colombo".to_string(),
        school: "School of Computing".to_string(),
        work: "".to_string(),
    }
}
