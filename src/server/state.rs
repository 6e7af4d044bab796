/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, holding the authentication
 * service, the user directory service, the session token codec, and the
 * user store handle. Everything is behind an `Arc`, shared by all request
 * tasks.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract exactly the service
 * they need (`State<Arc<AuthService>>`, `State<Arc<DirectoryService>>`)
 * instead of the whole `AppState`, following Axum's recommended pattern.
 */

use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::service::AuthService;
use crate::auth::sessions::TokenCodec;
use crate::directory::cache::DirectoryCache;
use crate::directory::service::DirectoryService;
use crate::users::store::UserStore;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Login and registration
    pub auth: Arc<AuthService>,

    /// User CRUD and search with the cached read path
    pub directory: Arc<DirectoryService>,

    /// Session token issuance and verification
    pub tokens: Arc<TokenCodec>,

    /// The store handle, used by the auth middleware to confirm a token's
    /// subject still resolves to an active user
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Wire the services over one store and one token codec
    ///
    /// `cache_ttl` bounds how stale the directory's cached reads may be.
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenCodec>, cache_ttl: Duration) -> Self {
        let auth = Arc::new(AuthService::new(store.clone(), tokens.clone()));
        let cache = DirectoryCache::new(cache_ttl);
        let directory = Arc::new(DirectoryService::new(store.clone(), cache));

        Self {
            auth,
            directory,
            tokens,
            store,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<DirectoryService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.directory.clone()
    }
}

impl FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}
