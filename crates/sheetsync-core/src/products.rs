use serde::{Deserialize, Serialize};

/// Column names of the bulk-import CSV, in the order the platform expects.
pub const PRODUCT_COLUMNS: [&str; 48] = [
    "Handle",
    "Title",
    "Body (HTML)",
    "Vendor",
    "Product Category",
    "Type",
    "Tags",
    "Published",
    "Option1 Name",
    "Option1 Value",
    "Option2 Name",
    "Option2 Value",
    "Option3 Name",
    "Option3 Value",
    "Variant SKU",
    "Variant Grams",
    "Variant Inventory Tracker",
    "Variant Inventory Policy",
    "Variant Fulfillment Service",
    "Variant Price",
    "Variant Compare At Price",
    "Variant Requires Shipping",
    "Variant Taxable",
    "Variant Barcode",
    "Image Src",
    "Image Position",
    "Image Alt Text",
    "Gift Card",
    "SEO Title",
    "SEO Description",
    "Google Shopping / Google Product Category",
    "Google Shopping / Gender",
    "Google Shopping / Age Group",
    "Google Shopping / MPN",
    "Google Shopping / AdWords Grouping",
    "Google Shopping / AdWords Labels",
    "Google Shopping / Condition",
    "Google Shopping / Custom Product",
    "Google Shopping / Custom Label 0",
    "Google Shopping / Custom Label 1",
    "Google Shopping / Custom Label 2",
    "Google Shopping / Custom Label 3",
    "Google Shopping / Custom Label 4",
    "Variant Image",
    "Variant Weight Unit",
    "Variant Tax Code",
    "Cost per item",
    "Status",
];

/// One row of the bulk-import CSV.
///
/// A record with a non-empty `title` is a *primary* row carrying the full
/// product metadata. A record with an empty `title` is a *variant* row that
/// only contributes option, SKU and price data to the primary row sharing its
/// `handle`. Field order matches [`PRODUCT_COLUMNS`], so serializing with
/// `csv` produces the header in the expected order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    #[serde(rename = "Handle")]
    pub handle: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Body (HTML)")]
    pub body_html: String,
    #[serde(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "Product Category")]
    pub product_category: String,
    #[serde(rename = "Type")]
    pub product_type: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Published")]
    pub published: String,
    #[serde(rename = "Option1 Name")]
    pub option1_name: String,
    #[serde(rename = "Option1 Value")]
    pub option1_value: String,
    #[serde(rename = "Option2 Name")]
    pub option2_name: String,
    #[serde(rename = "Option2 Value")]
    pub option2_value: String,
    #[serde(rename = "Option3 Name")]
    pub option3_name: String,
    #[serde(rename = "Option3 Value")]
    pub option3_value: String,
    #[serde(rename = "Variant SKU")]
    pub variant_sku: String,
    /// Weight in grams, as text (e.g. `"10000"`).
    #[serde(rename = "Variant Grams")]
    pub variant_grams: String,
    #[serde(rename = "Variant Inventory Tracker")]
    pub variant_inventory_tracker: String,
    #[serde(rename = "Variant Inventory Policy")]
    pub variant_inventory_policy: String,
    #[serde(rename = "Variant Fulfillment Service")]
    pub variant_fulfillment_service: String,
    /// Two-decimal price string, or empty when the source price was unusable.
    #[serde(rename = "Variant Price")]
    pub variant_price: String,
    #[serde(rename = "Variant Compare At Price")]
    pub variant_compare_at_price: String,
    #[serde(rename = "Variant Requires Shipping")]
    pub variant_requires_shipping: String,
    #[serde(rename = "Variant Taxable")]
    pub variant_taxable: String,
    #[serde(rename = "Variant Barcode")]
    pub variant_barcode: String,
    #[serde(rename = "Image Src")]
    pub image_src: String,
    #[serde(rename = "Image Position")]
    pub image_position: String,
    #[serde(rename = "Image Alt Text")]
    pub image_alt_text: String,
    #[serde(rename = "Gift Card")]
    pub gift_card: String,
    #[serde(rename = "SEO Title")]
    pub seo_title: String,
    #[serde(rename = "SEO Description")]
    pub seo_description: String,
    #[serde(rename = "Google Shopping / Google Product Category")]
    pub google_product_category: String,
    #[serde(rename = "Google Shopping / Gender")]
    pub google_gender: String,
    #[serde(rename = "Google Shopping / Age Group")]
    pub google_age_group: String,
    #[serde(rename = "Google Shopping / MPN")]
    pub google_mpn: String,
    #[serde(rename = "Google Shopping / AdWords Grouping")]
    pub google_adwords_grouping: String,
    #[serde(rename = "Google Shopping / AdWords Labels")]
    pub google_adwords_labels: String,
    #[serde(rename = "Google Shopping / Condition")]
    pub google_condition: String,
    #[serde(rename = "Google Shopping / Custom Product")]
    pub google_custom_product: String,
    #[serde(rename = "Google Shopping / Custom Label 0")]
    pub google_custom_label_0: String,
    #[serde(rename = "Google Shopping / Custom Label 1")]
    pub google_custom_label_1: String,
    #[serde(rename = "Google Shopping / Custom Label 2")]
    pub google_custom_label_2: String,
    #[serde(rename = "Google Shopping / Custom Label 3")]
    pub google_custom_label_3: String,
    #[serde(rename = "Google Shopping / Custom Label 4")]
    pub google_custom_label_4: String,
    #[serde(rename = "Variant Image")]
    pub variant_image: String,
    #[serde(rename = "Variant Weight Unit")]
    pub variant_weight_unit: String,
    #[serde(rename = "Variant Tax Code")]
    pub variant_tax_code: String,
    #[serde(rename = "Cost per item")]
    pub cost_per_item: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl ProductRecord {
    /// Returns `true` for a row carrying full product metadata.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        !self.title.is_empty()
    }

    /// Returns `true` for a row that only adds a variant to a primary row.
    #[must_use]
    pub fn is_variant(&self) -> bool {
        !self.is_primary()
    }

    /// Variant weight in kilograms, derived from `variant_grams`.
    ///
    /// Returns `0.0` when the grams column is empty or not numeric.
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        self.variant_grams
            .trim()
            .parse::<f64>()
            .map_or(0.0, |grams| grams / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_and_variant_roles_follow_title() {
        let mut record = ProductRecord {
            handle: "acme-x1-p".to_string(),
            ..ProductRecord::default()
        };
        assert!(record.is_variant());
        record.title = "Acme X1".to_string();
        assert!(record.is_primary());
    }

    #[test]
    fn weight_kg_converts_grams() {
        let record = ProductRecord {
            variant_grams: "10000".to_string(),
            ..ProductRecord::default()
        };
        assert!((record.weight_kg() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weight_kg_defaults_to_zero() {
        let record = ProductRecord::default();
        assert!(record.weight_kg().abs() < f64::EPSILON);
    }

    #[test]
    fn csv_header_matches_column_order() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(ProductRecord::default()).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header_line = text.lines().next().unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(header_line.as_bytes());
        let header = reader.records().next().unwrap().unwrap();
        let names: Vec<&str> = header.iter().collect();
        assert_eq!(names, PRODUCT_COLUMNS.to_vec());
    }

    #[test]
    fn deserializes_from_json_with_missing_columns() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"Handle":"acme-x1-p","Variant Price":"100.00"}"#).unwrap();
        assert_eq!(record.handle, "acme-x1-p");
        assert_eq!(record.variant_price, "100.00");
        assert!(record.title.is_empty());
    }
}
