//! Leaderboard Proxy Library
//!
//! HTTP front for a spreadsheet-backed leaderboard: fetches event tabs from
//! Google Sheets, ranks the top 10 and caches both for five hours.
//! This library exposes core modules for testing.

pub mod config;
pub mod error;
pub mod handlers;
pub mod ranking;
pub mod sheets;

// Re-export commonly used types for tests
pub use crate::config::{AppConfig, CacheConfig, ServerConfig, SheetsConfig};
pub use error::{AppError, AppResult};
pub use handlers::{router, AppState, DataSource, SheetResponse};
pub use ranking::{compute_top10, parse_points, RankedEntry};
pub use sheets::{CacheEntry, FetchError, SheetCache, SheetRows, SheetSource, SheetsClient};
