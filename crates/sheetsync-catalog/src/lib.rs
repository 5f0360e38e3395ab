pub mod error;
pub mod export;
pub mod group;
pub mod handle;
pub mod price;
pub mod reconcile;
pub mod transform;
pub mod validate;

pub use error::{ExportError, HandleError};
pub use export::{read_products_csv, write_products_csv};
pub use group::{group_by_model, ModelGroup};
pub use handle::{
    create_individual_handle, create_parent_handle, extract_base_handle, find_duplicate_handles,
    is_individual_handle, is_parent_handle, normalize_for_comparison, sanitize,
};
pub use price::{format_price, PriceInput};
pub use reconcile::{reconcile_prices, Reconciliation};
pub use transform::{CatalogBuild, ModelFailure, TransformedModel, Transformer};
pub use validate::{validate_products, InvalidRecord, Validation};
