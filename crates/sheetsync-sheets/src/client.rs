//! HTTP client for the Google Sheets values API (v4).
//!
//! Only API-key access is supported, so the sheet must be shared for reading
//! by link.

use std::time::Duration;

use reqwest::{Client, Url};
use sheetsync_core::PriceRow;

use crate::error::SheetsError;
use crate::ingest::rows_from_grid;
use crate::types::{ApiErrorEnvelope, ValueRange};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Client for reading cell ranges from one API key's view of Google Sheets.
///
/// Use [`SheetsClient::new`] for production or [`SheetsClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SheetsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SheetsClient {
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SheetsError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`SheetsError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Reads a range (e.g. `"Panel_Precios!A:ZZ"`) as a grid of strings.
    ///
    /// Numbers and booleans are rendered as text; empty cells become `""`.
    /// Rows keep whatever length the API returned, so trailing blanks are
    /// absent.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Api`] if Google returns an error body.
    /// - [`SheetsError::Http`] on network failure or another non-2xx status.
    /// - [`SheetsError::Deserialize`] if the body is not a value range.
    pub async fn read_range(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.values_url(sheet_id, range);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&body) {
                return Err(SheetsError::Api {
                    code: status.as_u16(),
                    message: envelope.error.message,
                });
            }
            return Err(SheetsError::Api {
                code: status.as_u16(),
                message: body,
            });
        }

        let value_range: ValueRange =
            serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
                context: format!("values({range})"),
                source: e,
            })?;

        tracing::debug!(
            range = %value_range.range,
            rows = value_range.values.len(),
            "read sheet range"
        );

        Ok(value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    /// Reads every column of `sheet_name` and maps the rows onto [`PriceRow`].
    ///
    /// # Errors
    ///
    /// Propagates [`SheetsClient::read_range`] errors, and returns
    /// [`SheetsError::Row`] if a row cannot be mapped.
    pub async fn fetch_price_rows(
        &self,
        sheet_id: &str,
        sheet_name: &str,
    ) -> Result<Vec<PriceRow>, SheetsError> {
        let grid = self.read_range(sheet_id, &format!("{sheet_name}!A:ZZ")).await?;
        let rows = rows_from_grid(&grid)?;
        tracing::info!(sheet = sheet_name, rows = rows.len(), "loaded price rows");
        Ok(rows)
    }

    fn values_url(&self, sheet_id: &str, range: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", sheet_id, "values", range]);
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
