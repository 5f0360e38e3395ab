use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// When a model gets a parent product with variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentPolicy {
    /// Every model gets a parent, even with a single size.
    #[default]
    Always,
    /// Only models with more than one row get a parent. Individuals are still
    /// produced for every row.
    MultiVariantOnly,
}

impl std::fmt::Display for ParentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParentPolicy::Always => write!(f, "always"),
            ParentPolicy::MultiVariantOnly => write!(f, "multi_variant_only"),
        }
    }
}

/// Store-specific constants stamped onto every generated product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogProfile {
    pub product_category: String,
    pub product_type: String,
    pub option_name: String,
    /// Appended to the parent SEO title: `"{brand} {model} - {seo_suffix}"`.
    pub seo_suffix: String,
    pub quality_blurb: String,
    pub multi_size_blurb: String,
    pub variant_grams: String,
    pub weight_unit: String,
    pub inventory_policy: String,
    pub fulfillment_service: String,
    pub parent_policy: ParentPolicy,
}

impl Default for CatalogProfile {
    fn default() -> Self {
        Self {
            product_category: "Neumáticos".to_string(),
            product_type: "Neumático".to_string(),
            option_name: "Medida".to_string(),
            seo_suffix: "Neumáticos".to_string(),
            quality_blurb: "Neumático de alta calidad".to_string(),
            multi_size_blurb: "disponible en múltiples medidas".to_string(),
            variant_grams: "10000".to_string(),
            weight_unit: "kg".to_string(),
            inventory_policy: "continue".to_string(),
            fulfillment_service: "manual".to_string(),
            parent_policy: ParentPolicy::Always,
        }
    }
}

/// Load and validate a catalog profile from a YAML file.
///
/// Keys missing from the file keep their default values.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<CatalogProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: CatalogProfile =
        serde_yaml::from_str(&content).map_err(ConfigError::ProfileFileParse)?;

    validate_profile(&profile)?;

    Ok(profile)
}

fn validate_profile(profile: &CatalogProfile) -> Result<(), ConfigError> {
    let required = [
        ("product_category", &profile.product_category),
        ("product_type", &profile.product_type),
        ("option_name", &profile.option_name),
        ("weight_unit", &profile.weight_unit),
        ("inventory_policy", &profile.inventory_policy),
        ("fulfillment_service", &profile.fulfillment_service),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{key} must be non-empty"
            )));
        }
    }

    if profile.variant_grams.trim().parse::<u32>().is_err() {
        return Err(ConfigError::Validation(format!(
            "variant_grams '{}' must be a whole number of grams",
            profile.variant_grams
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
