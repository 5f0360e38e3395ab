use std::path::PathBuf;

use crate::ConfigError;

/// Runtime settings for a sync run, assembled from environment variables by
/// [`crate::config::load_app_config`].
///
/// Credentials are optional here because not every command needs them; use
/// [`AppConfig::sheet_source`] and [`AppConfig::shopify_credentials`] to
/// require them at the point of use.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub google_sheet_id: Option<String>,
    pub google_api_key: Option<String>,
    pub price_sheet_name: String,
    pub shopify_shop_domain: Option<String>,
    pub shopify_access_token: Option<String>,
    pub shopify_api_version: String,
    pub output_csv_path: PathBuf,
    pub catalog_profile_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub call_delay_ms: u64,
    pub parent_delay_ms: u64,
    pub model_delay_ms: u64,
    pub price_update_delay_ms: u64,
    pub inventory_quantity: i64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

/// Where to read the price sheet from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSource {
    pub sheet_id: String,
    pub api_key: String,
    pub sheet_name: String,
}

/// Admin API access for one store.
#[derive(Clone, PartialEq, Eq)]
pub struct ShopifyCredentials {
    pub shop_domain: String,
    pub access_token: String,
    pub api_version: String,
}

impl AppConfig {
    /// Returns the Google Sheets source settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `GOOGLE_SHEET_ID` or
    /// `GOOGLE_API_KEY` is not set.
    pub fn sheet_source(&self) -> Result<SheetSource, ConfigError> {
        let sheet_id = self
            .google_sheet_id
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_SHEET_ID".to_string()))?;
        let api_key = self
            .google_api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_API_KEY".to_string()))?;
        Ok(SheetSource {
            sheet_id,
            api_key,
            sheet_name: self.price_sheet_name.clone(),
        })
    }

    /// Returns the Shopify Admin API credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `SHOPIFY_SHOP_DOMAIN` or
    /// `SHOPIFY_ACCESS_TOKEN` is not set.
    pub fn shopify_credentials(&self) -> Result<ShopifyCredentials, ConfigError> {
        let shop_domain = self
            .shopify_shop_domain
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPIFY_SHOP_DOMAIN".to_string()))?;
        let access_token = self
            .shopify_access_token
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("SHOPIFY_ACCESS_TOKEN".to_string()))?;
        Ok(ShopifyCredentials {
            shop_domain,
            access_token,
            api_version: self.shopify_api_version.clone(),
        })
    }
}

impl std::fmt::Debug for ShopifyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyCredentials")
            .field("shop_domain", &self.shop_domain)
            .field("access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("google_sheet_id", &self.google_sheet_id)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("price_sheet_name", &self.price_sheet_name)
            .field("shopify_shop_domain", &self.shopify_shop_domain)
            .field(
                "shopify_access_token",
                &self.shopify_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("shopify_api_version", &self.shopify_api_version)
            .field("output_csv_path", &self.output_csv_path)
            .field("catalog_profile_path", &self.catalog_profile_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("call_delay_ms", &self.call_delay_ms)
            .field("parent_delay_ms", &self.parent_delay_ms)
            .field("model_delay_ms", &self.model_delay_ms)
            .field("price_update_delay_ms", &self.price_update_delay_ms)
            .field("inventory_quantity", &self.inventory_quantity)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}
