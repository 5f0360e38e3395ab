use thiserror::Error;

/// Errors returned while reading the price sheet.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Network or TLS failure, or a non-2xx status without an API error body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Sheets API returned an `error` object.
    #[error("Google Sheets API error {code}: {message}")]
    Api { code: u16, message: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A data row could not be mapped onto the price-row schema.
    #[error("sheet row {row} does not match the price-row schema: {source}")]
    Row {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
