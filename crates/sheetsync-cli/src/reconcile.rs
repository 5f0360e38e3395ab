use std::path::Path;

use sheetsync_catalog::{read_products_csv, reconcile_prices, write_products_csv};
use sheetsync_core::AppConfig;

use crate::report;
use crate::source::load_rows;

/// Merges current sheet prices into the export at `existing` and writes the
/// result to `output` (or back over `existing`).
///
/// # Errors
///
/// Returns an error if either CSV cannot be read or written, or the price
/// rows cannot be loaded.
pub(crate) async fn run_reconcile(
    config: &AppConfig,
    input: Option<&Path>,
    existing: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let records = read_products_csv(existing)?;
    let rows = load_rows(config, input).await?;
    let reconciliation = reconcile_prices(records, &rows);

    let path = output.unwrap_or(existing);
    write_products_csv(&reconciliation.records, path)?;

    report::print_reconciliation(&reconciliation, path);
    Ok(())
}
