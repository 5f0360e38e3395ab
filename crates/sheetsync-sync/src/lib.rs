pub mod orchestrator;
pub mod pacing;
pub mod prices;
pub mod result;
pub mod shopify_sink;
pub mod sink;

pub use orchestrator::Orchestrator;
pub use pacing::Pacing;
pub use prices::{PriceUpdateSummary, PriceUpdater};
pub use result::{ParentStatus, SyncResult, SyncSummary};
pub use shopify_sink::ShopifySink;
pub use sink::{ExistingProduct, ExistingVariant, PriceTarget, ProductSink, UploadResult};
