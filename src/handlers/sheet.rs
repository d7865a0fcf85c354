//! Event leaderboard endpoint
//!
//! GET /sheet/{eventname}
//!
//! Serves an event tab and its top 10 from the cache, fetching and ranking
//! the tab on a miss.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::ranking::{compute_top10, RankedEntry};
use crate::sheets::{CacheEntry, SheetCache, SheetRows, SheetSource};

/// Shared state for the HTTP handlers
pub struct AppState {
    /// Event cache
    pub cache: SheetCache,
    /// Where event tabs come from
    pub source: Arc<dyn SheetSource>,
    /// Application start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(cache: SheetCache, source: Arc<dyn SheetSource>) -> Self {
        Self {
            cache,
            source,
            started_at: Utc::now(),
        }
    }
}

/// Where a response's data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    /// Served from the event cache
    Cache,
    /// Freshly fetched from the spreadsheet
    GoogleSheets,
}

/// Response for an event leaderboard
#[derive(Debug, Serialize, Deserialize)]
pub struct SheetResponse {
    pub source: DataSource,
    pub event: String,
    /// Raw rows, header included
    pub data: SheetRows,
    pub top10: Vec<RankedEntry>,
}

/// Get an event tab and its top 10
///
/// GET /sheet/{eventname}
pub async fn sheet_handler(
    State(state): State<Arc<AppState>>,
    Path(event): Path<String>,
) -> AppResult<Json<SheetResponse>> {
    if let Some(cached) = state.cache.get(&event) {
        tracing::debug!(event = %event, "Serving event from cache");
        return Ok(Json(SheetResponse {
            source: DataSource::Cache,
            event,
            data: cached.full_data,
            top10: cached.top10,
        }));
    }

    tracing::debug!(event = %event, "Cache miss, fetching event sheet");

    let rows = state
        .source
        .fetch_values(&event)
        .await
        .map_err(|e| AppError::from_fetch(&event, e))?;

    let top10 = compute_top10(&rows);

    state.cache.insert(
        event.clone(),
        CacheEntry {
            full_data: rows.clone(),
            top10: top10.clone(),
        },
    );

    tracing::info!(
        event = %event,
        rows = rows.len(),
        ranked = top10.len(),
        "Event sheet fetched and cached"
    );

    Ok(Json(SheetResponse {
        source: DataSource::GoogleSheets,
        event,
        data: rows,
        top10,
    }))
}
