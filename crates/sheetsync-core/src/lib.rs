pub mod app_config;
pub mod config;
pub mod products;
pub mod profile;
pub mod rows;

use thiserror::Error;

pub use app_config::{AppConfig, SheetSource, ShopifyCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{ProductRecord, PRODUCT_COLUMNS};
pub use profile::{load_profile, CatalogProfile, ParentPolicy};
pub use rows::PriceRow;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog profile at {path}: {source}")]
    ProfileFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog profile: {0}")]
    ProfileFileParse(#[from] serde_yaml::Error),

    #[error("catalog profile validation failed: {0}")]
    Validation(String),
}
