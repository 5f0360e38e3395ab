//! Collaborator traits the orchestrator and price updater upload through.

use async_trait::async_trait;
use sheetsync_core::ProductRecord;
use sheetsync_shopify::ShopifyError;

/// Outcome of one creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Created {
        product_id: i64,
        variant_ids: Vec<i64>,
    },
    Failed {
        error: String,
    },
}

impl UploadResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    pub fn failed(error: impl ToString) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }
}

/// Receives product and variant creations.
///
/// Implementations never return `Err`: every failure is folded into
/// [`UploadResult::Failed`] so one bad call cannot abort a batch.
#[async_trait]
pub trait ProductSink: Send + Sync {
    /// Creates a product from a primary record.
    async fn create_product(&self, record: &ProductRecord) -> UploadResult;

    /// Appends `record` as a variant of an existing product.
    async fn add_variant(&self, product_id: i64, record: &ProductRecord) -> UploadResult;
}

/// A product already in the shop, as far as price updates care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingProduct {
    pub product_id: i64,
    pub variants: Vec<ExistingVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingVariant {
    pub id: i64,
    pub sku: Option<String>,
}

impl ExistingProduct {
    /// The variant whose SKU equals `sku`, else the first variant.
    #[must_use]
    pub fn variant_for_sku(&self, sku: &str) -> Option<&ExistingVariant> {
        let sku = sku.trim();
        self.variants
            .iter()
            .find(|v| !sku.is_empty() && v.sku.as_deref().map(str::trim) == Some(sku))
            .or_else(|| self.variants.first())
    }
}

/// Remote catalog that supports lookup by handle and price edits.
#[async_trait]
pub trait PriceTarget: Send + Sync {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<ExistingProduct>, ShopifyError>;

    async fn update_variant_price(
        &self,
        variant_id: i64,
        price: &str,
        compare_at_price: Option<&str>,
    ) -> Result<(), ShopifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> ExistingProduct {
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
                ExistingVariant { id: 12, sku: None },
            ],
        }
    }

    #[test]
    fn variant_for_sku_prefers_exact_match() {
        assert_eq!(product().variant_for_sku("C2-p").map(|v| v.id), Some(11));
    }

    #[test]
    fn variant_for_sku_falls_back_to_first() {
        assert_eq!(product().variant_for_sku("ZZ-p").map(|v| v.id), Some(10));
        assert_eq!(product().variant_for_sku("").map(|v| v.id), Some(10));
    }

    #[test]
    fn variant_for_sku_on_empty_product() {
        let empty = ExistingProduct {
            product_id: 1,
            variants: Vec::new(),
        };
        assert!(empty.variant_for_sku("C1-p").is_none());
    }

    #[test]
    fn upload_result_success_flag() {
        assert!(UploadResult::Created {
            product_id: 1,
            variant_ids: vec![2]
        }
        .is_success());
        assert!(!UploadResult::failed("boom").is_success());
    }
}
