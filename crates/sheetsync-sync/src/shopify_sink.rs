//! [`ProductSink`] and [`PriceTarget`] backed by the Shopify Admin API.

use async_trait::async_trait;
use sheetsync_core::ProductRecord;
use sheetsync_shopify::{product_payload, variant_payload, AdminClient, AdminVariant, ShopifyError};
use tokio::sync::OnceCell;

use crate::sink::{ExistingProduct, ExistingVariant, PriceTarget, ProductSink, UploadResult};

/// Uploads through an [`AdminClient`] and stocks every created variant.
///
/// After each successful creation the variant's available quantity is set to
/// `inventory_quantity` at the shop's first location. Inventory failures are
/// logged and never change the creation result. The location is looked up
/// once per sink and reused.
pub struct ShopifySink {
    client: AdminClient,
    inventory_quantity: i64,
    location: OnceCell<i64>,
}

impl ShopifySink {
    #[must_use]
    pub fn new(client: AdminClient, inventory_quantity: i64) -> Self {
        Self {
            client,
            inventory_quantity,
            location: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    async fn location_id(&self) -> Result<i64, ShopifyError> {
        self.location
            .get_or_try_init(|| self.client.first_location_id())
            .await
            .copied()
    }

    async fn stock_variants(&self, variants: &[AdminVariant]) {
        if self.inventory_quantity <= 0 {
            return;
        }
        let location_id = match self.location_id().await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "no inventory location; skipping stock levels");
                return;
            }
        };
        for variant in variants {
            let Some(inventory_item_id) = variant.inventory_item_id else {
                continue;
            };
            if let Err(e) = self
                .client
                .set_inventory_level(location_id, inventory_item_id, self.inventory_quantity)
                .await
            {
                tracing::warn!(
                    variant_id = variant.id,
                    inventory_item_id,
                    error = %e,
                    "failed to set inventory level"
                );
            }
        }
    }
}

#[async_trait]
impl ProductSink for ShopifySink {
    async fn create_product(&self, record: &ProductRecord) -> UploadResult {
        match self.client.create_product(&product_payload(record)).await {
            Ok(product) => {
                self.stock_variants(&product.variants).await;
                UploadResult::Created {
                    product_id: product.id,
                    variant_ids: product.variants.iter().map(|v| v.id).collect(),
                }
            }
            Err(e) => UploadResult::failed(e),
        }
    }

    async fn add_variant(&self, product_id: i64, record: &ProductRecord) -> UploadResult {
        match self
            .client
            .add_variant(product_id, &variant_payload(record))
            .await
        {
            Ok(variant) => {
                self.stock_variants(std::slice::from_ref(&variant)).await;
                UploadResult::Created {
                    product_id,
                    variant_ids: vec![variant.id],
                }
            }
            Err(e) => UploadResult::failed(e),
        }
    }
}

#[async_trait]
impl PriceTarget for ShopifySink {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<ExistingProduct>, ShopifyError> {
        let found = self.client.find_product_by_handle(handle).await?;
        Ok(found.map(|product| ExistingProduct {
            product_id: product.id,
            variants: product
                .variants
                .into_iter()
                .map(|v| ExistingVariant { id: v.id, sku: v.sku })
                .collect(),
        }))
    }

    async fn update_variant_price(
        &self,
        variant_id: i64,
        price: &str,
        compare_at_price: Option<&str>,
    ) -> Result<(), ShopifyError> {
        self.client
            .update_variant_price(variant_id, price, compare_at_price)
            .await
    }
}
