//! Root and health check endpoints

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use super::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Uptime in seconds
    pub uptime_seconds: i64,
    /// Events currently held in the cache
    pub cached_events: usize,
}

/// Service banner
///
/// GET /
pub async fn root() -> &'static str {
    "Leaderboard API"
}

/// Health check handler
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let uptime = (Utc::now() - state.started_at).num_seconds();

    Json(HealthResponse {
        status: "healthy",
        uptime_seconds: uptime,
        cached_events: state.cache.len(),
    })
}
