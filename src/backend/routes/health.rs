/**
 * Health Probe
 *
 * `GET /health` reports whether the connection cache currently holds a
 * live storage handle. It never triggers a connection attempt.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::backend::server::state::AccountCache;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving
    pub status: String,
    /// "connected" or "idle"
    pub database: String,
}

pub async fn health(State(accounts): State<Arc<AccountCache>>) -> Json<HealthResponse> {
    let database = if accounts.is_connected() { "connected" } else { "idle" };
    Json(HealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
    })
}
