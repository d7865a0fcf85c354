//! Google Sheets access and the per-event cache
//!
//! - `client`: fetches a tab's values from the Sheets API
//! - `cache`: keeps fetched tabs and their rankings for a fixed TTL

pub mod cache;
pub mod client;

use thiserror::Error;

pub use cache::{CacheEntry, SheetCache, DEFAULT_TTL_SECS};
pub use client::SheetsClient;

/// Raw tab contents, row 0 being the header
pub type SheetRows = Vec<Vec<String>>;

/// Errors from fetching an event tab
#[derive(Error, Debug)]
pub enum FetchError {
    /// The tab answered with no rows
    #[error("No rows returned")]
    NoData,

    /// The API answered with a non-success status
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Transport failure (connect, timeout, TLS)
    #[error("{0}")]
    Http(String),

    /// Response body could not be decoded
    #[error("Failed to decode sheet response: {0}")]
    Decode(String),
}

/// Source of raw event rows
#[async_trait::async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch every row of the tab named `event`
    async fn fetch_values(&self, event: &str) -> Result<SheetRows, FetchError>;
}
