/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health probe
 * 2. API routes (auth)
 * 3. Fallback handler (JSON 404)
 *
 * Every request passes through a `tower_http` trace layer, so each one
 * gets a tracing span with method, URI, status and latency.
 */

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::health::health;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (connection cache, session keys)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Route Details
///
/// - `GET /health` - Liveness and storage status
/// - `POST /api/auth/signup` - Account registration
/// - `POST /api/auth/signin` - Sign-in
/// - `GET /api/auth/me` - Current account
///
/// Unknown routes answer `404` with the standard JSON error body.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    // Add API routes
    let router = configure_api_routes(router, app_state.clone());

    // Fallback handler for 404
    let router = router.fallback(|| async { BackendError::not_found("Not found") });

    router
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}
