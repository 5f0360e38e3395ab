//! Fixed-interval pacing between Admin API calls.

use std::time::Duration;

use sheetsync_core::AppConfig;

/// Pauses inserted between upload calls to stay under the shop's request
/// ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Between consecutive variant appends and individual creations.
    pub call: Duration,
    /// After a parent family is created, before its individuals start.
    pub parent_to_individual: Duration,
    /// Between consecutive models in a batch.
    pub between_models: Duration,
    /// Between consecutive price-only updates.
    pub price_update: Duration,
}

impl Pacing {
    /// No pauses at all. Used by tests and dry runs.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            call: Duration::ZERO,
            parent_to_individual: Duration::ZERO,
            between_models: Duration::ZERO,
            price_update: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            call: Duration::from_millis(config.call_delay_ms),
            parent_to_individual: Duration::from_millis(config.parent_delay_ms),
            between_models: Duration::from_millis(config.model_delay_ms),
            price_update: Duration::from_millis(config.price_update_delay_ms),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            call: Duration::from_millis(600),
            parent_to_individual: Duration::from_millis(2000),
            between_models: Duration::from_millis(2000),
            price_update: Duration::from_millis(500),
        }
    }
}

pub(crate) async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
