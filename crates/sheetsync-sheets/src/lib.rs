pub mod client;
pub mod error;
pub mod ingest;
pub mod types;

pub use client::SheetsClient;
pub use error::SheetsError;
pub use ingest::{read_price_csv, rows_from_grid};
