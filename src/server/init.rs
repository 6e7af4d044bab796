/**
 * Server Initialization
 *
 * This module assembles the application: store selection, service wiring,
 * and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the database pool; fall back to the in-memory store without one
 * 2. Build the token codec from the configured secret and TTL
 * 3. Wire the services into `AppState`
 * 4. Create the router
 *
 * The server stays usable without a database for development, at the cost
 * of losing all records on restart. The signing secret has no such
 * fallback; configuration loading already refused to start without it.
 */

use axum::Router;
use std::sync::Arc;

use crate::auth::sessions::TokenCodec;
use crate::routes::create_router;
use crate::server::config::{load_database, AppConfig};
use crate::server::state::AppState;
use crate::users::memory::InMemoryUserStore;
use crate::users::postgres::PgUserStore;
use crate::users::store::UserStore;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("initializing campusdir server");

    // Step 1: pick the user store
    let store: Arc<dyn UserStore> = match load_database().await {
        Some(pool) => Arc::new(PgUserStore::new(pool)),
        None => {
            tracing::warn!(
                "no database available; using in-memory user store (records will not survive a restart)"
            );
            Arc::new(InMemoryUserStore::new())
        }
    };

    // Step 2: token codec from process-wide configuration
    let tokens = Arc::new(TokenCodec::new(&config.jwt_secret, config.token_ttl));

    // Step 3: wire services
    let state = AppState::new(store, tokens, config.cache_ttl);
    tracing::info!(
        "services wired (token ttl: {:?}, cache ttl: {:?})",
        config.token_ttl,
        config.cache_ttl
    );

    // Step 4: router
    create_router(state, &config.allowed_origins)
}
