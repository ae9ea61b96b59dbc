/**
 * API Route Handlers
 *
 * This module defines the authentication API routes.
 *
 * # Routes
 *
 * - `POST /api/auth/signup` - Account registration
 * - `POST /api/auth/signin` - Sign-in, returns a session token
 * - `GET /api/auth/me` - Current account (requires a session token)
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, signin, signup};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
///
/// # Returns
///
/// Router with API routes configured
///
/// # Authentication
///
/// - `/api/auth/me` - Requires a bearer token; checked by `auth_middleware`
/// - `/api/auth/signup`, `/api/auth/signin` - Public
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    router
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/signin", post(signin))
        .merge(protected)
}
