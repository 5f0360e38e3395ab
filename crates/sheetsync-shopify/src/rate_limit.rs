//! Retry utilities for the Admin API client.
//!
//! Retries are opt-in: with `max_retries = 0` every call is attempted exactly
//! once and its error is returned as-is.
//!
//! A non-idempotent request (a `POST` that creates something) is only replayed
//! when the shop never processed it: a 429 or a failed connection. A timeout or
//! 5xx may arrive after the product was created, and replaying it would create
//! a duplicate.

use std::future::Future;
use std::time::Duration;

use crate::error::ShopifyError;

/// Returns `true` if `err` is a transient condition worth retrying.
///
/// Retriable: 429 responses, network failures and 5xx responses; for
/// non-idempotent requests only 429s and connection failures. Everything
/// else (4xx validation errors, missing endpoints, malformed bodies) is
/// returned immediately.
fn is_retriable(err: &ShopifyError, idempotent: bool) -> bool {
    match err {
        ShopifyError::RateLimited { .. } => true,
        ShopifyError::Http(e) => idempotent || e.is_connect(),
        ShopifyError::Api { status, .. } => idempotent && *status >= 500,
        ShopifyError::Deserialize { .. }
        | ShopifyError::NotFound { .. }
        | ShopifyError::InvalidShopDomain { .. }
        | ShopifyError::MissingField { .. } => false,
    }
}

/// Executes `operation`, retrying transient errors with exponential backoff.
///
/// The wait before retry `n` is `backoff_base_secs * 2^(n-1)` seconds with
/// ±25% jitter, or the server's `Retry-After` value when a 429 asks for longer. With
/// `max_retries = 3` the operation runs at most 4 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    idempotent: bool,
    mut operation: F,
) -> Result<T, ShopifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ShopifyError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err, idempotent) || attempt >= max_retries {
            return Err(err);
        }

        let backoff_ms = backoff_base_secs
            .saturating_mul(1000)
            .saturating_mul(1u64 << attempt.min(40));
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let jittered_ms = (backoff_ms as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
        let delay_ms = match &err {
            ShopifyError::RateLimited {
                retry_after_secs, ..
            } => jittered_ms.max(retry_after_secs.saturating_mul(1000)),
            _ => jittered_ms,
        };
        attempt += 1;
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms,
            error = %err,
            "transient Shopify error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}
