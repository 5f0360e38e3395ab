use std::collections::HashMap;

use sheetsync_core::{PriceRow, ProductRecord};

use crate::price::format_price;

const DEFAULT_STATUS: &str = "active";

/// Result of merging fresh prices into a previous export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub records: Vec<ProductRecord>,
    /// Records whose handle matched a price row.
    pub updated: usize,
    /// Records whose prices were kept because no price row carried their handle.
    pub not_found: usize,
    /// Records dropped because they had no handle.
    pub dropped: usize,
}

/// Merges prices from `prices` into `existing`, keyed by handle.
///
/// Price rows are indexed by their `Handle` column (trimmed, lowercased); a
/// later row with the same handle wins. A matched record takes `Variant Price`
/// and `Cost per item` from the row's tax-inclusive price. Every kept record's
/// status becomes the row's `Estado`, else its own status, else `active`,
/// lowercased.
#[must_use]
pub fn reconcile_prices(existing: Vec<ProductRecord>, prices: &[PriceRow]) -> Reconciliation {
    let by_handle: HashMap<String, &PriceRow> = prices
        .iter()
        .filter_map(|row| {
            let key = row.handle.as_deref()?.trim().to_lowercase();
            (!key.is_empty()).then_some((key, row))
        })
        .collect();

    let mut result = Reconciliation::default();
    for (position, mut record) in existing.into_iter().enumerate() {
        let key = record.handle.trim().to_lowercase();
        if key.is_empty() {
            tracing::warn!(row = position + 2, "dropping record without handle");
            result.dropped += 1;
            continue;
        }

        let row = by_handle.get(&key);
        if let Some(row) = row {
            let price = format_price(row.price_text());
            record.variant_price.clone_from(&price);
            record.cost_per_item = price;
            result.updated += 1;
        } else {
            result.not_found += 1;
        }
        record.status = row
            .and_then(|row| row.status.as_deref())
            .or(Some(record.status.as_str()).filter(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_STATUS)
            .to_lowercase();
        result.records.push(record);
    }

    tracing::info!(
        price_rows = by_handle.len(),
        updated = result.updated,
        not_found = result.not_found,
        dropped = result.dropped,
        "reconciled prices"
    );
    result
}
