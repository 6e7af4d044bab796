/**
 * Router Configuration
 *
 * This module assembles the application router: public auth routes, the
 * guarded directory routes, CORS, and request tracing.
 */

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::{protected_routes, public_routes};
use crate::server::state::AppState;

/// Build the CORS layer from the configured origin list
///
/// Origins that fail to parse as header values are logged and skipped
/// rather than taking the server down.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring unparsable CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `state` - Application state holding the wired services
/// * `allowed_origins` - Origins permitted by the CORS policy
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router<()> {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
