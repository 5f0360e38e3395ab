use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from the variables already in the process
/// environment, without reading `.env`.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Blank values are treated as unset.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("SHEETSYNC_LOG_LEVEL", "info");

    let google_sheet_id = optional("GOOGLE_SHEET_ID");
    let google_api_key = optional("GOOGLE_API_KEY");
    let price_sheet_name = or_default("PRICE_SHEET_NAME", "Panel_Precios");

    let shopify_shop_domain = optional("SHOPIFY_SHOP_DOMAIN");
    let shopify_access_token = optional("SHOPIFY_ACCESS_TOKEN");
    let shopify_api_version = or_default("SHOPIFY_API_VERSION", "2024-01");

    let output_csv_path = PathBuf::from(or_default(
        "OUTPUT_CSV_PATH",
        "./output/shopify_products.csv",
    ));
    let catalog_profile_path = optional("SHEETSYNC_CATALOG_PROFILE").map(PathBuf::from);

    let request_timeout_secs = parse_u64("SHEETSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHEETSYNC_USER_AGENT", "sheetsync/0.1 (catalog-sync)");

    let call_delay_ms = parse_u64("SHEETSYNC_CALL_DELAY_MS", "600")?;
    let parent_delay_ms = parse_u64("SHEETSYNC_PARENT_DELAY_MS", "2000")?;
    let model_delay_ms = parse_u64("SHEETSYNC_MODEL_DELAY_MS", "2000")?;
    let price_update_delay_ms = parse_u64("SHEETSYNC_PRICE_UPDATE_DELAY_MS", "500")?;

    let inventory_quantity = parse_i64("SHEETSYNC_INVENTORY_QUANTITY", "20")?;
    if inventory_quantity < 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHEETSYNC_INVENTORY_QUANTITY".to_string(),
            reason: format!("must be zero or positive, got {inventory_quantity}"),
        });
    }

    let max_retries = parse_u32("SHEETSYNC_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("SHEETSYNC_RETRY_BACKOFF_BASE_SECS", "2")?;

    Ok(AppConfig {
        log_level,
        google_sheet_id,
        google_api_key,
        price_sheet_name,
        shopify_shop_domain,
        shopify_access_token,
        shopify_api_version,
        output_csv_path,
        catalog_profile_path,
        request_timeout_secs,
        user_agent,
        call_delay_ms,
        parent_delay_ms,
        model_delay_ms,
        price_update_delay_ms,
        inventory_quantity,
        max_retries,
        retry_backoff_base_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
