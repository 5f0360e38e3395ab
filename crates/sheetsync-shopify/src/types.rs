//! Shopify Admin REST request and response bodies.
//!
//! Only the fields this tool reads or writes are modelled. Response types
//! ignore unknown fields; request types serialize exactly what the Admin API
//! expects under its `product`/`variant` envelopes.
//!
//! ### IDs
//! Admin REST returns numeric IDs (`6789012345678`); they stay `i64`
//! everywhere.
//!
//! ### `compare_at_price`
//! Sent as JSON `null` when the record has no compare-at price so Shopify
//! clears any previous value instead of keeping it.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST products.json`.
#[derive(Debug, Serialize)]
pub struct ProductEnvelope<'a> {
    pub product: &'a ProductPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub title: String,
    pub body_html: String,
    pub vendor: String,
    pub product_type: String,
    pub tags: String,
    pub handle: String,
    pub published: bool,
    pub status: String,
    pub options: Vec<OptionPayload>,
    pub variants: Vec<VariantPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImagePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionPayload {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePayload {
    pub src: String,
    pub alt: String,
}

/// Body of `POST products/{id}/variants.json`.
#[derive(Debug, Serialize)]
pub struct VariantEnvelope<'a> {
    pub variant: &'a VariantPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantPayload {
    pub option1: String,
    pub sku: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub barcode: String,
    pub weight: f64,
    pub weight_unit: String,
    pub inventory_management: String,
    pub inventory_policy: String,
    pub fulfillment_service: String,
    pub requires_shipping: bool,
    pub taxable: bool,
}

/// Body of `POST inventory_levels/set.json`.
#[derive(Debug, Serialize)]
pub struct InventoryLevelSet {
    pub location_id: i64,
    pub inventory_item_id: i64,
    pub available: i64,
}

/// Body of `PUT variants/{id}.json` for a price-only change.
#[derive(Debug, Serialize)]
pub struct VariantPriceEnvelope {
    pub variant: VariantPriceUpdate,
}

#[derive(Debug, Serialize)]
pub struct VariantPriceUpdate {
    pub id: i64,
    pub price: String,
    pub compare_at_price: Option<String>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Response of `POST products.json`.
#[derive(Debug, Deserialize)]
pub struct CreatedProductResponse {
    pub product: AdminProduct,
}

/// Response of `POST products/{id}/variants.json`.
#[derive(Debug, Deserialize)]
pub struct CreatedVariantResponse {
    pub variant: AdminVariant,
}

/// Product as returned by the Admin API.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminProduct {
    pub id: i64,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub variants: Vec<AdminVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminVariant {
    pub id: i64,
    #[serde(default)]
    pub inventory_item_id: Option<i64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

/// Response of `GET products.json?handle=…`.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<AdminProduct>,
}

/// Response of `GET locations.json`.
#[derive(Debug, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of `GET products/count.json`.
#[derive(Debug, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Error body Shopify attaches to 4xx responses. `errors` is either a string
/// or an object keyed by field.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub errors: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_product_tolerates_missing_fields() {
        let product: AdminProduct = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(product.id, 42);
        assert!(product.variants.is_empty());
        assert!(product.handle.is_none());
    }

    #[test]
    fn variant_payload_serializes_null_compare_at() {
        let payload = VariantPayload {
            option1: "Default".to_owned(),
            sku: "C1-p".to_owned(),
            price: "100.00".to_owned(),
            compare_at_price: None,
            barcode: String::new(),
            weight: 10.0,
            weight_unit: "kg".to_owned(),
            inventory_management: "shopify".to_owned(),
            inventory_policy: "continue".to_owned(),
            fulfillment_service: "manual".to_owned(),
            requires_shipping: true,
            taxable: true,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["compare_at_price"].is_null());
        assert_eq!(value["weight"], 10.0);
    }

    #[test]
    fn product_payload_omits_empty_images() {
        let payload = ProductPayload {
            title: "Acme X1".to_owned(),
            body_html: String::new(),
            vendor: "Acme".to_owned(),
            product_type: String::new(),
            tags: String::new(),
            handle: "acme-x1-p".to_owned(),
            published: true,
            status: "active".to_owned(),
            options: Vec::new(),
            variants: Vec::new(),
            images: Vec::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("images").is_none());
    }
}
