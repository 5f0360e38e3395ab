//! Where price rows and the catalog profile come from.

use std::path::Path;

use anyhow::Context;
use sheetsync_catalog::Transformer;
use sheetsync_core::{AppConfig, CatalogProfile, PriceRow};
use sheetsync_sheets::SheetsClient;

/// Reads the price rows from `input` when given, else from the configured
/// Google Sheet.
///
/// # Errors
///
/// Returns an error if the CSV cannot be read, the sheet credentials are
/// missing, or the Sheets request fails.
pub(crate) async fn load_rows(
    config: &AppConfig,
    input: Option<&Path>,
) -> anyhow::Result<Vec<PriceRow>> {
    if let Some(path) = input {
        return sheetsync_sheets::read_price_csv(path)
            .with_context(|| format!("reading price rows from {}", path.display()));
    }

    let sheet = config.sheet_source()?;
    let client = SheetsClient::new(
        &sheet.api_key,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let rows = client
        .fetch_price_rows(&sheet.sheet_id, &sheet.sheet_name)
        .await
        .with_context(|| format!("reading sheet {}", sheet.sheet_name))?;
    Ok(rows)
}

/// Loads `SHEETSYNC_CATALOG_PROFILE` when set, else the built-in profile.
///
/// # Errors
///
/// Returns an error if the profile file cannot be read or fails validation.
pub(crate) fn load_transformer(config: &AppConfig) -> anyhow::Result<Transformer> {
    let profile = match &config.catalog_profile_path {
        Some(path) => {
            let profile = sheetsync_core::load_profile(path)?;
            tracing::info!(path = %path.display(), "loaded catalog profile");
            profile
        }
        None => CatalogProfile::default(),
    };
    Ok(Transformer::new(profile))
}
