//! Google Sheets values API client
//!
//! Reads a whole tab with `GET /v4/spreadsheets/{id}/values/{range}`, using the
//! event name as the range. The API treats a bare tab name as the full tab.

use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::{FetchError, SheetRows, SheetSource};
use crate::config::SheetsConfig;

/// Body of a successful `values.get` call
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<SheetRows>,
}

/// Google error envelope: `{ "error": { "code", "message", "status" } }`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Fetches event tabs from one spreadsheet
pub struct SheetsClient {
    /// HTTP client
    client: Client,
    /// API root, e.g. `https://sheets.googleapis.com`
    base_url: Url,
    spreadsheet_id: String,
    api_key: Option<SecretString>,
}

impl SheetsClient {
    /// Create a client from the `sheets` config section
    pub fn new(config: &SheetsConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::Http(format!("Invalid Sheets base URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| FetchError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// URL of the values of tab `event`, the name encoded as one path segment
    fn values_url(&self, event: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| FetchError::Http("Sheets base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", event]);

        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key.expose_secret());
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
impl SheetSource for SheetsClient {
    async fn fetch_values(&self, event: &str) -> Result<SheetRows, FetchError> {
        let url = self.values_url(event)?;

        tracing::debug!(event = event, "Fetching sheet values");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());

            return Err(FetchError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.without_url().to_string()))?;

        match range.values {
            Some(rows) if !rows.is_empty() => {
                tracing::debug!(event = event, rows = rows.len(), "Fetched sheet values");
                Ok(rows)
            }
            _ => Err(FetchError::NoData),
        }
    }
}
