use std::path::Path;

use super::*;

#[test]
fn default_profile_is_valid() {
    assert!(validate_profile(&CatalogProfile::default()).is_ok());
}

#[test]
fn default_parent_policy_is_always() {
    assert_eq!(CatalogProfile::default().parent_policy, ParentPolicy::Always);
}

#[test]
fn validate_rejects_empty_option_name() {
    let profile = CatalogProfile {
        option_name: "  ".to_string(),
        ..CatalogProfile::default()
    };
    let err = validate_profile(&profile).unwrap_err();
    assert!(err.to_string().contains("option_name must be non-empty"));
}

#[test]
fn validate_rejects_non_numeric_grams() {
    let profile = CatalogProfile {
        variant_grams: "ten kilos".to_string(),
        ..CatalogProfile::default()
    };
    let err = validate_profile(&profile).unwrap_err();
    assert!(err.to_string().contains("variant_grams"));
}

#[test]
fn partial_yaml_keeps_defaults() {
    let yaml = "product_type: Llanta\nparent_policy: multi_variant_only\n";
    let profile: CatalogProfile = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(profile.product_type, "Llanta");
    assert_eq!(profile.parent_policy, ParentPolicy::MultiVariantOnly);
    assert_eq!(profile.option_name, "Medida");
    assert_eq!(profile.variant_grams, "10000");
}

#[test]
fn unknown_parent_policy_fails_to_parse() {
    let yaml = "parent_policy: sometimes\n";
    let result: Result<CatalogProfile, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}

#[test]
fn load_profile_missing_file_is_io_error() {
    let err = load_profile(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::ProfileFileIo { .. }));
}

#[test]
fn load_real_catalog_yaml() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/catalog.yaml");
    let profile = load_profile(&path).expect("config/catalog.yaml should load");
    assert_eq!(profile, CatalogProfile::default());
}
