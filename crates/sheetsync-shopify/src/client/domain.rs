//! Shop domain normalisation and Admin API base URL construction.

use reqwest::Url;

use crate::error::ShopifyError;

/// Strips an `http(s)://` scheme and trailing slashes from a configured shop
/// domain, so `"https://tires.myshopify.com/"` becomes `"tires.myshopify.com"`.
#[must_use]
pub fn normalize_shop_domain(domain: &str) -> String {
    let trimmed = domain.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_owned()
}

/// Builds `https://{domain}/admin/api/{version}/`.
///
/// # Errors
///
/// Returns [`ShopifyError::InvalidShopDomain`] if the domain is empty or the
/// resulting URL does not parse.
pub(super) fn admin_base_url(domain: &str, api_version: &str) -> Result<Url, ShopifyError> {
    let host = normalize_shop_domain(domain);
    if host.is_empty() {
        return Err(ShopifyError::InvalidShopDomain {
            domain: domain.to_owned(),
            reason: "domain is empty".to_owned(),
        });
    }
    Url::parse(&format!("https://{host}/admin/api/{api_version}/")).map_err(|e| {
        ShopifyError::InvalidShopDomain {
            domain: domain.to_owned(),
            reason: e.to_string(),
        }
    })
}

/// Host name of `url` for error messages, falling back to the full URL.
pub(super) fn host_of(url: &Url) -> String {
    url.host_str()
        .map_or_else(|| url.to_string(), str::to_owned)
}
