//! Reshapes one [`ModelGroup`] into bulk-import records.
//!
//! Every model yields a parent family (one primary row plus one variant row
//! per extra size, all sharing a `-p` handle) and one standalone individual
//! product per row with its own `-i` handle.

use sheetsync_core::{CatalogProfile, ParentPolicy, PriceRow, ProductRecord};

use crate::error::HandleError;
use crate::group::ModelGroup;
use crate::handle::{create_individual_handle, create_parent_handle, normalize_for_comparison};
use crate::price::format_price;

const PUBLISHED: &str = "TRUE";
const INVENTORY_TRACKER: &str = "shopify";
const YES: &str = "TRUE";
const NO: &str = "FALSE";
const CONDITION_NEW: &str = "new";
const STATUS_ACTIVE: &str = "active";
const DEFAULT_OPTION_VALUE: &str = "Default";

/// Records produced for one model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformedModel {
    /// Primary row first, then one variant row per remaining size. Empty when
    /// the parent policy skipped this model.
    pub parent_rows: Vec<ProductRecord>,
    pub individual_rows: Vec<ProductRecord>,
}

/// A model whose handles could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFailure {
    pub label: String,
    pub error: HandleError,
}

/// Output of [`Transformer::transform_all`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBuild {
    pub parent_rows: Vec<ProductRecord>,
    pub individual_rows: Vec<ProductRecord>,
    pub failures: Vec<ModelFailure>,
}

impl CatalogBuild {
    /// All parent rows in model order, followed by all individual rows.
    #[must_use]
    pub fn records(&self) -> Vec<ProductRecord> {
        self.parent_rows
            .iter()
            .chain(self.individual_rows.iter())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Transformer {
    profile: CatalogProfile,
}

impl Transformer {
    #[must_use]
    pub fn new(profile: CatalogProfile) -> Self {
        Self { profile }
    }

    #[must_use]
    pub fn profile(&self) -> &CatalogProfile {
        &self.profile
    }

    /// Builds the parent family and the individual products for one model.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::InvalidInput`] if the brand or model sanitizes to
    /// an empty handle fragment.
    pub fn transform_model(&self, group: &ModelGroup) -> Result<TransformedModel, HandleError> {
        let Some(first) = group.variants.first() else {
            return Ok(TransformedModel::default());
        };

        let description = shared_description(group);

        let parent_rows = match self.profile.parent_policy {
            ParentPolicy::MultiVariantOnly if group.variants.len() < 2 => Vec::new(),
            ParentPolicy::Always | ParentPolicy::MultiVariantOnly => {
                let handle = create_parent_handle(&group.brand, &group.model)?;
                let mut rows = Vec::with_capacity(group.variants.len());
                rows.push(self.parent_primary_row(group, first, &handle, &description));
                rows.extend(
                    group.variants[1..]
                        .iter()
                        .map(|row| self.parent_variant_row(row, &handle)),
                );
                rows
            }
        };

        let fallback_image = first.image_text();
        let individual_rows = group
            .variants
            .iter()
            .map(|row| self.individual_row(group, row, &description, fallback_image))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TransformedModel {
            parent_rows,
            individual_rows,
        })
    }

    /// Transforms every group, collecting handle failures instead of stopping.
    #[must_use]
    pub fn transform_all(&self, groups: &[ModelGroup]) -> CatalogBuild {
        let mut build = CatalogBuild::default();
        for group in groups {
            match self.transform_model(group) {
                Ok(model) => {
                    build.parent_rows.extend(model.parent_rows);
                    build.individual_rows.extend(model.individual_rows);
                }
                Err(error) => {
                    tracing::warn!(model = %group.label(), error = %error, "skipping model");
                    build.failures.push(ModelFailure {
                        label: group.label(),
                        error,
                    });
                }
            }
        }
        build
    }

    fn parent_primary_row(
        &self,
        group: &ModelGroup,
        first: &PriceRow,
        handle: &str,
        description: &str,
    ) -> ProductRecord {
        let p = &self.profile;
        let title = group.label();
        let sku = suffixed_sku(first.code_text(), "-p");
        let price = format_price(first.price_text());
        let image = first.image_text();

        let body_html = if description.is_empty() {
            format!("<p>{title} - {} {}</p>", p.quality_blurb, p.multi_size_blurb)
        } else {
            format!("<p>{description}</p>")
        };
        let seo_description = if description.is_empty() {
            format!("{title} - {}", p.quality_blurb)
        } else {
            description.to_string()
        };

        ProductRecord {
            handle: handle.to_string(),
            body_html,
            vendor: group.brand.clone(),
            product_category: p.product_category.clone(),
            product_type: p.product_type.clone(),
            tags: tags_for(group, first),
            published: PUBLISHED.to_string(),
            option1_name: p.option_name.clone(),
            option1_value: option_value(first.size_text()),
            variant_sku: sku.clone(),
            variant_price: price.clone(),
            image_src: image.to_string(),
            image_position: if image.is_empty() { String::new() } else { "1".to_string() },
            image_alt_text: if image.is_empty() { String::new() } else { title.clone() },
            gift_card: NO.to_string(),
            seo_title: format!("{title} - {}", p.seo_suffix),
            seo_description,
            google_mpn: sku,
            google_condition: CONDITION_NEW.to_string(),
            google_custom_product: NO.to_string(),
            google_custom_label_0: group.brand.clone(),
            variant_weight_unit: p.weight_unit.clone(),
            cost_per_item: price,
            status: STATUS_ACTIVE.to_string(),
            title,
            ..self.logistics()
        }
    }

    fn parent_variant_row(&self, row: &PriceRow, handle: &str) -> ProductRecord {
        let price = format_price(row.price_text());
        ProductRecord {
            handle: handle.to_string(),
            option1_value: row.size_text().to_string(),
            variant_sku: suffixed_sku(row.code_text(), "-p"),
            variant_price: price.clone(),
            cost_per_item: price,
            ..self.logistics()
        }
    }

    fn individual_row(
        &self,
        group: &ModelGroup,
        row: &PriceRow,
        description: &str,
        fallback_image: &str,
    ) -> Result<ProductRecord, HandleError> {
        let p = &self.profile;
        let size = row.size_text();
        let handle = create_individual_handle(&group.brand, &group.model, size, row.code_text())?;
        let label = group.label();
        let title = format!("{label} {size}");
        let sku = suffixed_sku(row.code_text(), "-i");
        let price = format_price(row.price_text());
        let image = match row.image_text() {
            "" => fallback_image,
            own => own,
        };

        let body_html = if description.is_empty() {
            format!("<p>{label} - {}</p>", p.quality_blurb)
        } else {
            format!("<p>{description}</p>")
        };
        let seo_description = if description.is_empty() {
            format!("{title} - {}", p.quality_blurb)
        } else {
            description.to_string()
        };

        Ok(ProductRecord {
            handle,
            body_html,
            vendor: group.brand.clone(),
            product_category: p.product_category.clone(),
            product_type: p.product_type.clone(),
            tags: tags_for(group, &group.variants[0]),
            published: PUBLISHED.to_string(),
            option1_name: p.option_name.clone(),
            option1_value: option_value(size),
            variant_sku: sku.clone(),
            variant_price: price.clone(),
            image_src: image.to_string(),
            image_position: if image.is_empty() { String::new() } else { "1".to_string() },
            image_alt_text: if image.is_empty() { String::new() } else { title.clone() },
            gift_card: NO.to_string(),
            seo_title: title.clone(),
            seo_description,
            google_mpn: sku,
            google_condition: CONDITION_NEW.to_string(),
            google_custom_product: NO.to_string(),
            google_custom_label_0: group.brand.clone(),
            variant_weight_unit: p.weight_unit.clone(),
            cost_per_item: price,
            status: STATUS_ACTIVE.to_string(),
            title,
            ..self.logistics()
        })
    }

    /// Per-variant shipping and inventory columns shared by every row kind.
    fn logistics(&self) -> ProductRecord {
        ProductRecord {
            variant_grams: self.profile.variant_grams.clone(),
            variant_inventory_tracker: INVENTORY_TRACKER.to_string(),
            variant_inventory_policy: self.profile.inventory_policy.clone(),
            variant_fulfillment_service: self.profile.fulfillment_service.clone(),
            variant_requires_shipping: YES.to_string(),
            variant_taxable: YES.to_string(),
            ..ProductRecord::default()
        }
    }
}

/// First description on a row whose model matches the group's, else the
/// first description anywhere in the group, else empty.
fn shared_description(group: &ModelGroup) -> String {
    let wanted = normalize_for_comparison(&group.model);
    group
        .variants
        .iter()
        .find(|row| {
            !row.description_text().is_empty()
                && normalize_for_comparison(row.model_text()) == wanted
        })
        .or_else(|| {
            group
                .variants
                .iter()
                .find(|row| !row.description_text().is_empty())
        })
        .map(|row| row.description_text().to_string())
        .unwrap_or_default()
}

fn tags_for(group: &ModelGroup, first: &PriceRow) -> String {
    match first.tag_text() {
        "" => group.brand.clone(),
        tag => tag.to_string(),
    }
}

fn option_value(size: &str) -> String {
    if size.is_empty() {
        DEFAULT_OPTION_VALUE.to_string()
    } else {
        size.to_string()
    }
}

fn suffixed_sku(code: &str, suffix: &str) -> String {
    if code.is_empty() {
        String::new()
    } else {
        format!("{code}{suffix}")
    }
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
