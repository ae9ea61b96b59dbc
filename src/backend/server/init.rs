/**
 * Server Initialization
 *
 * This module assembles the application: storage connector, application
 * state, and router.
 *
 * # Initialization Process
 *
 * 1. Build the storage connector from configuration (no connection yet)
 * 2. Create `AppState` around an empty connection cache
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_connector;
use crate::backend::server::state::AppState;
use crate::shared::{AppConfig, ConfigError};

/// Create the application state from configuration
///
/// # Errors
///
/// `ConfigError` if the storage URL cannot be used
pub fn create_state(config: &AppConfig) -> Result<AppState, ConfigError> {
    let connector = load_connector(config)?;
    Ok(AppState::new(connector, config))
}

/// Create and configure the Axum application
///
/// Storage is connected lazily by the first request that needs it; see
/// `server::config::warm_up` to connect ahead of time.
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: AppConfig) -> Result<Router, ConfigError> {
    tracing::info!("Initializing Legacy Ledger backend server");

    let app_state = create_state(&config)?;
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}
