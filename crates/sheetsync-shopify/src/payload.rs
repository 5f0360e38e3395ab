//! Maps catalog records onto Admin API request bodies.

use sheetsync_core::ProductRecord;

use crate::types::{ImagePayload, OptionPayload, ProductPayload, VariantPayload};

const DEFAULT_OPTION_NAME: &str = "Medida";
const DEFAULT_OPTION_VALUE: &str = "Default";

/// Builds the `product` body for a primary record, with the record itself as
/// the product's only initial variant.
#[must_use]
pub fn product_payload(record: &ProductRecord) -> ProductPayload {
    let option_name = or_default(&record.option1_name, DEFAULT_OPTION_NAME);
    let option_value = or_default(&record.option1_value, DEFAULT_OPTION_VALUE);

    let images = if record.image_src.is_empty() {
        Vec::new()
    } else {
        vec![ImagePayload {
            src: record.image_src.clone(),
            alt: record.image_alt_text.clone(),
        }]
    };

    ProductPayload {
        title: record.title.clone(),
        body_html: record.body_html.clone(),
        vendor: record.vendor.clone(),
        product_type: record.product_type.clone(),
        tags: record.tags.clone(),
        handle: record.handle.clone(),
        published: is_true(&record.published),
        status: or_default(&record.status, "active"),
        options: vec![OptionPayload {
            name: option_name,
            values: vec![option_value],
        }],
        variants: vec![variant_payload(record)],
        images,
    }
}

/// Builds the `variant` body for any record.
#[must_use]
pub fn variant_payload(record: &ProductRecord) -> VariantPayload {
    VariantPayload {
        option1: or_default(&record.option1_value, DEFAULT_OPTION_VALUE),
        sku: record.variant_sku.clone(),
        price: record.variant_price.clone(),
        compare_at_price: non_empty(&record.variant_compare_at_price),
        barcode: record.variant_barcode.clone(),
        weight: record.weight_kg(),
        weight_unit: or_default(&record.variant_weight_unit, "kg"),
        inventory_management: "shopify".to_owned(),
        inventory_policy: or_default(&record.variant_inventory_policy, "continue"),
        fulfillment_service: or_default(&record.variant_fulfillment_service, "manual"),
        requires_shipping: is_true(&record.variant_requires_shipping),
        taxable: is_true(&record.variant_taxable),
    }
}

/// `TRUE`/`FALSE` columns are exact-match; anything else reads as false.
fn is_true(value: &str) -> bool {
    value == "TRUE"
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;
