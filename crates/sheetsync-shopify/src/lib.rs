pub mod client;
pub mod error;
pub mod payload;
pub(crate) mod rate_limit;
pub mod types;

pub use client::{normalize_shop_domain, AdminClient};
pub use error::ShopifyError;
pub use payload::{product_payload, variant_payload};
pub use types::{AdminProduct, AdminVariant, Location, ProductPayload, VariantPayload};
