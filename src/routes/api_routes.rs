/**
 * API Route Handlers
 *
 * This module wires handlers to paths, split into the public
 * authentication routes and the bearer-guarded directory routes.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 *
 * ## Authentication (guarded)
 * - `POST /api/auth/validate` - Validate the presented token
 *
 * ## User directory (guarded)
 * - `GET/POST /api/users`, `GET/PUT/DELETE /api/users/{id}`
 * - `GET /api/users/search/name`, `GET /api/users/university/{university}`,
 *   `GET /api/users/age-range`
 */

use axum::{middleware, routing, Router};

use crate::auth::handlers::{login, register, validate_token};
use crate::directory::handlers::{
    create_user, delete_user, get_user, list_users, search_users_by_name, users_by_age_range,
    users_by_university, update_user,
};
use crate::middleware::auth::require_auth;
use crate::server::state::AppState;

/// Public authentication routes
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", routing::post(register))
        .route("/api/auth/login", routing::post(login))
}

/// Routes that require a valid session token
///
/// The authentication middleware runs before every handler here; handlers
/// can rely on `AuthUser` being present.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/validate", routing::post(validate_token))
        .route(
            "/api/users",
            routing::get(list_users).post(create_user),
        )
        .route(
            "/api/users/search/name",
            routing::get(search_users_by_name),
        )
        .route(
            "/api/users/university/{university}",
            routing::get(users_by_university),
        )
        .route("/api/users/age-range", routing::get(users_by_age_range))
        .route(
            "/api/users/{id}",
            routing::get(get_user).put(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
