//! HTTP client for the Shopify Admin REST API.

mod domain;

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sheetsync_core::ShopifyCredentials;

use crate::error::ShopifyError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{
    AdminProduct, AdminVariant, CountResponse, CreatedProductResponse, CreatedVariantResponse,
    ErrorBody, InventoryLevelSet, Location, LocationsResponse, ProductEnvelope, ProductPayload,
    ProductsResponse, VariantEnvelope, VariantPayload, VariantPriceEnvelope, VariantPriceUpdate,
};

pub use domain::normalize_shop_domain;

/// Fallback wait when a 429 carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const NO_BODY: Option<&()> = None;

/// Authenticated client for one shop's Admin REST API.
///
/// Maps 429 to [`ShopifyError::RateLimited`], 404 to [`ShopifyError::NotFound`]
/// and any other non-2xx status to [`ShopifyError::Api`]. Transient errors
/// are retried up to `max_retries` extra times; the default of `0` sends each
/// request exactly once.
pub struct AdminClient {
    client: Client,
    base_url: Url,
    access_token: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl AdminClient {
    /// Creates a client for `https://{shop_domain}/admin/api/{api_version}/`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidShopDomain`] if the domain is empty or
    /// unparseable, or [`ShopifyError::Http`] if the `reqwest::Client` cannot
    /// be built.
    pub fn new(
        credentials: &ShopifyCredentials,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let base_url = domain::admin_base_url(&credentials.shop_domain, &credentials.api_version)?;
        Self::build(
            &credentials.access_token,
            base_url,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_secs,
        )
    }

    /// Creates a client rooted at an arbitrary base URL (for wiremock tests).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::InvalidShopDomain`] if `base_url` does not
    /// parse, or [`ShopifyError::Http`] if the `reqwest::Client` cannot be
    /// built.
    pub fn with_base_url(
        access_token: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ShopifyError::InvalidShopDomain {
            domain: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Self::build(
            access_token,
            parsed,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_secs,
        )
    }

    fn build(
        access_token: &str,
        base_url: Url,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            access_token: access_token.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Host this client talks to, for logs and reports.
    #[must_use]
    pub fn shop_domain(&self) -> String {
        domain::host_of(&self.base_url)
    }

    /// `POST products.json`.
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`] from the request; a 422 carries Shopify's
    /// validation message in [`ShopifyError::Api`].
    pub async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<AdminProduct, ShopifyError> {
        let url = self.endpoint(&["products.json"]);
        let body = ProductEnvelope { product: payload };
        let response: CreatedProductResponse = self
            .send(Method::POST, url, Some(&body), "create product")
            .await?;
        tracing::debug!(
            handle = %payload.handle,
            product_id = response.product.id,
            "created product"
        );
        Ok(response.product)
    }

    /// `POST products/{id}/variants.json`.
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`] from the request.
    pub async fn add_variant(
        &self,
        product_id: i64,
        payload: &VariantPayload,
    ) -> Result<AdminVariant, ShopifyError> {
        let id = product_id.to_string();
        let url = self.endpoint(&["products", &id, "variants.json"]);
        let body = VariantEnvelope { variant: payload };
        let response: CreatedVariantResponse = self
            .send(Method::POST, url, Some(&body), "add variant")
            .await?;
        Ok(response.variant)
    }

    /// `GET locations.json`.
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`] from the request.
    pub async fn list_locations(&self) -> Result<Vec<Location>, ShopifyError> {
        let url = self.endpoint(&["locations.json"]);
        let response: LocationsResponse =
            self.send(Method::GET, url, NO_BODY, "list locations").await?;
        Ok(response.locations)
    }

    /// Id of the first location the shop reports.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::MissingField`] if the shop has no locations.
    pub async fn first_location_id(&self) -> Result<i64, ShopifyError> {
        self.list_locations()
            .await?
            .first()
            .map(|location| location.id)
            .ok_or_else(|| ShopifyError::MissingField {
                context: "locations.json".to_owned(),
                field: "locations[0]",
            })
    }

    /// `POST inventory_levels/set.json`.
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`] from the request.
    pub async fn set_inventory_level(
        &self,
        location_id: i64,
        inventory_item_id: i64,
        available: i64,
    ) -> Result<(), ShopifyError> {
        let url = self.endpoint(&["inventory_levels", "set.json"]);
        let body = InventoryLevelSet {
            location_id,
            inventory_item_id,
            available,
        };
        let _: serde_json::Value = self
            .send(Method::POST, url, Some(&body), "set inventory level")
            .await?;
        Ok(())
    }

    /// `GET products.json?handle=…`, returning the product with exactly that
    /// handle if the shop has one.
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`] from the request.
    pub async fn find_product_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<AdminProduct>, ShopifyError> {
        let mut url = self.endpoint(&["products.json"]);
        url.query_pairs_mut().append_pair("handle", handle);
        let response: ProductsResponse = self
            .send(Method::GET, url, NO_BODY, "find product by handle")
            .await?;
        Ok(response
            .products
            .into_iter()
            .find(|product| product.handle.as_deref().is_none_or(|h| h == handle)))
    }

    /// `PUT variants/{id}.json` with only the price fields.
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`] from the request.
    pub async fn update_variant_price(
        &self,
        variant_id: i64,
        price: &str,
        compare_at_price: Option<&str>,
    ) -> Result<(), ShopifyError> {
        let file = format!("{variant_id}.json");
        let url = self.endpoint(&["variants", &file]);
        let body = VariantPriceEnvelope {
            variant: VariantPriceUpdate {
                id: variant_id,
                price: price.to_owned(),
                compare_at_price: compare_at_price.map(str::to_owned),
            },
        };
        let _: serde_json::Value = self
            .send(Method::PUT, url, Some(&body), "update variant price")
            .await?;
        Ok(())
    }

    /// `GET products/count.json`.
    ///
    /// # Errors
    ///
    /// Any [`ShopifyError`] from the request.
    pub async fn product_count(&self) -> Result<u64, ShopifyError> {
        let url = self.endpoint(&["products", "count.json"]);
        let response: CountResponse = self.send(Method::GET, url, NO_BODY, "product count").await?;
        Ok(response.count)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        context: &str,
    ) -> Result<T, ShopifyError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let idempotent = method != Method::POST;
        retry_with_backoff(self.max_retries, self.backoff_base_secs, idempotent, || {
            let method = method.clone();
            let url = url.clone();
            async move {
                let mut request = self
                    .client
                    .request(method, url.clone())
                    .header(ACCESS_TOKEN_HEADER, &self.access_token)
                    .header(reqwest::header::ACCEPT, "application/json");
                if let Some(body) = body {
                    request = request.json(body);
                }

                let response = request.send().await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(parse_retry_after)
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(ShopifyError::RateLimited {
                        domain: domain::host_of(&url),
                        retry_after_secs,
                    });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(ShopifyError::NotFound {
                        url: url.to_string(),
                    });
                }

                let text = response.text().await?;

                if !status.is_success() {
                    return Err(ShopifyError::Api {
                        status: status.as_u16(),
                        url: url.to_string(),
                        message: error_message(&text),
                    });
                }

                serde_json::from_str::<T>(&text).map_err(|e| ShopifyError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

/// Shopify sends `Retry-After` as fractional seconds (`"2.0"`).
fn parse_retry_after(value: &str) -> Option<u64> {
    let secs = value.trim().parse::<f64>().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(secs.ceil() as u64)
}

/// Renders the `errors` member of an error body, or the raw body when it has
/// none.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            errors: serde_json::Value::String(message),
        }) => message,
        Ok(ErrorBody { errors }) => errors.to_string(),
        Err(_) => body.trim().to_owned(),
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
