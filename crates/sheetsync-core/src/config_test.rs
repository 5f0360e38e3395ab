use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with every credential populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("GOOGLE_SHEET_ID", "sheet-123");
    m.insert("GOOGLE_API_KEY", "google-key");
    m.insert("SHOPIFY_SHOP_DOMAIN", "tires.myshopify.com");
    m.insert("SHOPIFY_ACCESS_TOKEN", "shpat_secret");
    m
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[test]
fn build_app_config_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.price_sheet_name, "Panel_Precios");
    assert_eq!(cfg.shopify_api_version, "2024-01");
    assert_eq!(
        cfg.output_csv_path,
        PathBuf::from("./output/shopify_products.csv")
    );
    assert!(cfg.catalog_profile_path.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "sheetsync/0.1 (catalog-sync)");
    assert_eq!(cfg.call_delay_ms, 600);
    assert_eq!(cfg.parent_delay_ms, 2000);
    assert_eq!(cfg.model_delay_ms, 2000);
    assert_eq!(cfg.price_update_delay_ms, 500);
    assert_eq!(cfg.inventory_quantity, 20);
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.retry_backoff_base_secs, 2);
}

#[test]
fn build_app_config_reads_credentials() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.google_sheet_id.as_deref(), Some("sheet-123"));
    assert_eq!(cfg.shopify_shop_domain.as_deref(), Some("tires.myshopify.com"));
}

#[test]
fn build_app_config_treats_blank_as_unset() {
    let mut map = full_env();
    map.insert("GOOGLE_SHEET_ID", "   ");
    map.insert("PRICE_SHEET_NAME", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.google_sheet_id.is_none());
    assert_eq!(cfg.price_sheet_name, "Panel_Precios");
}

#[test]
fn build_app_config_overrides() {
    let mut map = full_env();
    map.insert("PRICE_SHEET_NAME", "Precios_2025");
    map.insert("SHOPIFY_API_VERSION", "2024-10");
    map.insert("OUTPUT_CSV_PATH", "/tmp/out.csv");
    map.insert("SHEETSYNC_CATALOG_PROFILE", "config/catalog.yaml");
    map.insert("SHEETSYNC_CALL_DELAY_MS", "0");
    map.insert("SHEETSYNC_MAX_RETRIES", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.price_sheet_name, "Precios_2025");
    assert_eq!(cfg.shopify_api_version, "2024-10");
    assert_eq!(cfg.output_csv_path, PathBuf::from("/tmp/out.csv"));
    assert_eq!(
        cfg.catalog_profile_path,
        Some(PathBuf::from("config/catalog.yaml"))
    );
    assert_eq!(cfg.call_delay_ms, 0);
    assert_eq!(cfg.max_retries, 3);
}

#[test]
fn build_app_config_call_delay_invalid() {
    let mut map = full_env();
    map.insert("SHEETSYNC_CALL_DELAY_MS", "fast");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHEETSYNC_CALL_DELAY_MS"),
        "expected InvalidEnvVar(SHEETSYNC_CALL_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = full_env();
    map.insert("SHEETSYNC_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHEETSYNC_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SHEETSYNC_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_max_retries_negative_is_invalid() {
    let mut map = full_env();
    map.insert("SHEETSYNC_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHEETSYNC_MAX_RETRIES"),
        "expected InvalidEnvVar(SHEETSYNC_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn build_app_config_inventory_quantity_negative_is_invalid() {
    let mut map = full_env();
    map.insert("SHEETSYNC_INVENTORY_QUANTITY", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHEETSYNC_INVENTORY_QUANTITY"),
        "expected InvalidEnvVar(SHEETSYNC_INVENTORY_QUANTITY), got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Lazy credential accessors
// ---------------------------------------------------------------------------

#[test]
fn sheet_source_requires_sheet_id() {
    let mut map = full_env();
    map.remove("GOOGLE_SHEET_ID");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let err = cfg.sheet_source().unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "GOOGLE_SHEET_ID"));
}

#[test]
fn sheet_source_carries_sheet_name() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let source = cfg.sheet_source().unwrap();
    assert_eq!(source.sheet_id, "sheet-123");
    assert_eq!(source.api_key, "google-key");
    assert_eq!(source.sheet_name, "Panel_Precios");
}

#[test]
fn shopify_credentials_requires_token() {
    let mut map = full_env();
    map.remove("SHOPIFY_ACCESS_TOKEN");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let err = cfg.shopify_credentials().unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "SHOPIFY_ACCESS_TOKEN"));
}

#[test]
fn debug_output_redacts_secrets() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("shpat_secret"));
    assert!(!rendered.contains("google-key"));
    assert!(rendered.contains("[redacted]"));

    let creds = cfg.shopify_credentials().unwrap();
    assert!(!format!("{creds:?}").contains("shpat_secret"));
}
