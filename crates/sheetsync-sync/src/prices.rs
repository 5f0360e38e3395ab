//! Price-only updates of products that already exist in the shop.

use std::collections::HashMap;

use sheetsync_core::ProductRecord;

use crate::pacing::{pause, Pacing};
use crate::sink::{ExistingProduct, PriceTarget};

/// Totals for one price-update run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceUpdateSummary {
    pub updated: usize,
    pub not_found: usize,
    pub failed: usize,
    /// Records with no price to send.
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl PriceUpdateSummary {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.updated + self.not_found + self.failed
    }
}

pub struct PriceUpdater<T> {
    target: T,
    pacing: Pacing,
}

impl<T: PriceTarget> PriceUpdater<T> {
    pub fn new(target: T, pacing: Pacing) -> Self {
        Self { target, pacing }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Pushes `Variant Price` and `Variant Compare At Price` of each record
    /// to the remote variant with the same SKU (else the product's first
    /// variant). Lookups are cached per handle, so a parent family costs one
    /// lookup.
    pub async fn update_prices(&self, records: &[ProductRecord]) -> PriceUpdateSummary {
        let mut summary = PriceUpdateSummary::default();
        let mut lookups: HashMap<&str, Option<ExistingProduct>> = HashMap::new();
        let mut first = true;

        for record in records {
            let handle = record.handle.trim();
            if handle.is_empty() || record.variant_price.is_empty() {
                summary.skipped += 1;
                continue;
            }
            if !first {
                pause(self.pacing.price_update).await;
            }
            first = false;

            if !lookups.contains_key(handle) {
                match self.target.find_by_handle(handle).await {
                    Ok(found) => {
                        lookups.insert(handle, found);
                    }
                    Err(e) => {
                        tracing::warn!(handle, error = %e, "product lookup failed");
                        summary.failed += 1;
                        summary.errors.push(format!("{handle}: {e}"));
                        continue;
                    }
                }
            }

            let Some(variant) = lookups
                .get(handle)
                .and_then(Option::as_ref)
                .and_then(|product| product.variant_for_sku(&record.variant_sku))
            else {
                tracing::warn!(handle, sku = %record.variant_sku, "no remote product for handle");
                summary.not_found += 1;
                continue;
            };

            let compare_at =
                Some(record.variant_compare_at_price.as_str()).filter(|v| !v.is_empty());
            match self
                .target
                .update_variant_price(variant.id, &record.variant_price, compare_at)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        handle,
                        variant_id = variant.id,
                        price = %record.variant_price,
                        "price updated"
                    );
                    summary.updated += 1;
                }
                Err(e) => {
                    tracing::warn!(handle, variant_id = variant.id, error = %e, "price update failed");
                    summary.failed += 1;
                    summary.errors.push(format!("{handle}: {e}"));
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use sheetsync_shopify::ShopifyError;

    use super::*;
    use crate::sink::ExistingVariant;

    #[derive(Default)]
    struct FakeTarget {
        products: HashMap<String, ExistingProduct>,
        lookups: Mutex<Vec<String>>,
        updates: Mutex<Vec<(i64, String, Option<String>)>>,
        fail_lookup: Option<String>,
        fail_variant: Option<i64>,
    }

    #[async_trait]
    impl PriceTarget for FakeTarget {
        async fn find_by_handle(
            &self,
            handle: &str,
        ) -> Result<Option<ExistingProduct>, ShopifyError> {
            self.lookups.lock().unwrap().push(handle.to_owned());
            if self.fail_lookup.as_deref() == Some(handle) {
                return Err(ShopifyError::Api {
                    status: 500,
                    url: "products.json".to_owned(),
                    message: "boom".to_owned(),
                });
            }
            Ok(self.products.get(handle).cloned())
        }

        async fn update_variant_price(
            &self,
            variant_id: i64,
            price: &str,
            compare_at_price: Option<&str>,
        ) -> Result<(), ShopifyError> {
            if self.fail_variant == Some(variant_id) {
                return Err(ShopifyError::Api {
                    status: 422,
                    url: format!("variants/{variant_id}.json"),
                    message: "price is invalid".to_owned(),
                });
            }
            self.updates.lock().unwrap().push((
                variant_id,
                price.to_owned(),
                compare_at_price.map(str::to_owned),
            ));
            Ok(())
        }
    }

    fn record(handle: &str, sku: &str, price: &str) -> ProductRecord {
        ProductRecord {
            handle: handle.to_owned(),
            variant_sku: sku.to_owned(),
            variant_price: price.to_owned(),
            ..ProductRecord::default()
        }
    }

    fn target() -> FakeTarget {
        let mut products = HashMap::new();
        products.insert(
            "acme-x1-p".to_owned(),
            ExistingProduct {
                product_id: 1,
                variants: vec![
                    ExistingVariant {
                        id: 10,
                        sku: Some("C1-p".to_owned()),
                    },
                    ExistingVariant {
                        id: 11,
                        sku: Some("C2-p".to_owned()),
                    },
                ],
            },
        );
        FakeTarget {
            products,
            ..FakeTarget::default()
        }
    }

    #[tokio::test]
    async fn updates_sku_matching_variants_with_one_lookup() {
        let updater = PriceUpdater::new(target(), Pacing::none());
        let summary = updater
            .update_prices(&[
                record("acme-x1-p", "C1-p", "100.00"),
                record("acme-x1-p", "C2-p", "120.00"),
            ])
            .await;

        assert_eq!(summary.updated, 2);
        assert_eq!(updater.target().lookups.lock().unwrap().len(), 1);
        let updates = updater.target().updates.lock().unwrap().clone();
        assert_eq!(
            updates,
            vec![
                (10, "100.00".to_owned(), None),
                (11, "120.00".to_owned(), None),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_sku_falls_back_to_first_variant() {
        let updater = PriceUpdater::new(target(), Pacing::none());
        let mut rec = record("acme-x1-p", "ZZ-p", "99.00");
        rec.variant_compare_at_price = "110.00".to_owned();
        let summary = updater.update_prices(&[rec]).await;

        assert_eq!(summary.updated, 1);
        let updates = updater.target().updates.lock().unwrap().clone();
        assert_eq!(updates, vec![(10, "99.00".to_owned(), Some("110.00".to_owned()))]);
    }

    #[tokio::test]
    async fn missing_product_counts_not_found() {
        let updater = PriceUpdater::new(target(), Pacing::none());
        let summary = updater
            .update_prices(&[
                record("beta-y-p", "B1-p", "50.00"),
                record("beta-y-p", "B2-p", "60.00"),
            ])
            .await;

        assert_eq!(summary.not_found, 2);
        assert_eq!(summary.updated, 0);
        assert_eq!(updater.target().lookups.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failures_are_collected_and_run_continues() {
        let mut t = target();
        t.fail_lookup = Some("broken-p".to_owned());
        t.fail_variant = Some(11);
        let updater = PriceUpdater::new(t, Pacing::none());
        let summary = updater
            .update_prices(&[
                record("broken-p", "X-p", "1.00"),
                record("acme-x1-p", "C2-p", "120.00"),
                record("acme-x1-p", "C1-p", "100.00"),
            ])
            .await;

        assert_eq!(summary.failed, 2);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.errors.len(), 2);
        assert!(summary.errors[0].starts_with("broken-p:"));
        assert_eq!(summary.attempted(), 3);
    }

    #[tokio::test]
    async fn records_without_price_or_handle_are_skipped() {
        let updater = PriceUpdater::new(target(), Pacing::none());
        let summary = updater
            .update_prices(&[record("acme-x1-p", "C1-p", ""), record("", "C1-p", "10.00")])
            .await;

        assert_eq!(summary.skipped, 2);
        assert!(updater.target().lookups.lock().unwrap().is_empty());
    }
}
