//! Commands that talk to the Shopify Admin API.
//!
//! Per-item failures end up in the printed summary; only configuration and
//! setup errors make a command fail.

use std::path::Path;

use sheetsync_catalog::{group_by_model, ModelGroup, Transformer};
use sheetsync_core::AppConfig;
use sheetsync_shopify::AdminClient;
use sheetsync_sync::{Orchestrator, Pacing, PriceUpdater, ShopifySink};

use crate::export::plan_export;
use crate::report;
use crate::source::{load_rows, load_transformer};

/// Which models a `sync` run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModelSelection {
    pub models: Option<usize>,
    pub max_variants: Option<usize>,
    pub min_variants: usize,
}

/// Counts shown by `sync --dry-run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SyncPlan {
    pub models: usize,
    pub parents: usize,
    pub parent_variants: usize,
    pub individuals: usize,
    pub handle_failures: usize,
}

impl SyncPlan {
    pub fn total_products(&self) -> usize {
        self.parents + self.individuals
    }
}

/// Drops models below `min_variants`, keeps the first `models`, and trims
/// each to `max_variants` rows.
pub(crate) fn select_groups(groups: Vec<ModelGroup>, selection: &ModelSelection) -> Vec<ModelGroup> {
    groups
        .into_iter()
        .filter(|g| g.variants.len() >= selection.min_variants)
        .take(selection.models.unwrap_or(usize::MAX))
        .map(|g| match selection.max_variants {
            Some(max) => g.truncated(max),
            None => g,
        })
        .collect()
}

pub(crate) fn plan_sync(transformer: &Transformer, groups: &[ModelGroup]) -> SyncPlan {
    let build = transformer.transform_all(groups);
    let parents = build.parent_rows.iter().filter(|r| r.is_primary()).count();
    SyncPlan {
        models: groups.len(),
        parents,
        parent_variants: build.parent_rows.len() - parents,
        individuals: build.individual_rows.len(),
        handle_failures: build.failures.len(),
    }
}

fn admin_client(config: &AppConfig) -> anyhow::Result<AdminClient> {
    let credentials = config.shopify_credentials()?;
    let client = AdminClient::new(
        &credentials,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )?;
    Ok(client)
}

/// Uploads the selected models as parent families plus individuals.
///
/// # Errors
///
/// Returns an error if rows, profile, or Shopify credentials cannot be
/// loaded. Upload failures are reported, not returned.
pub(crate) async fn run_sync(
    config: &AppConfig,
    input: Option<&Path>,
    selection: &ModelSelection,
    dry_run: bool,
) -> anyhow::Result<()> {
    let transformer = load_transformer(config)?;
    let rows = load_rows(config, input).await?;
    let groups = select_groups(group_by_model(&rows), selection);

    if dry_run {
        report::print_sync_plan(&plan_sync(&transformer, &groups));
        return Ok(());
    }

    let client = admin_client(config)?;
    let shop = client.shop_domain();
    let sink = ShopifySink::new(client, config.inventory_quantity);
    let orchestrator = Orchestrator::new(sink, transformer, Pacing::from_config(config));

    tracing::info!(shop = %shop, models = groups.len(), "uploading to Shopify");
    let summary = orchestrator.sync_groups(&groups).await;
    report::print_sync_summary(&summary, &shop);
    Ok(())
}

/// Pushes current prices onto products that already exist in the shop.
///
/// # Errors
///
/// Returns an error if rows, profile, or Shopify credentials cannot be
/// loaded.
pub(crate) async fn run_prices(
    config: &AppConfig,
    input: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let transformer = load_transformer(config)?;
    let rows = load_rows(config, input).await?;
    let plan = plan_export(&transformer, &rows);
    let records = plan.validation.valid;

    if dry_run {
        report::print_price_plan(&records);
        return Ok(());
    }

    let sink = ShopifySink::new(admin_client(config)?, config.inventory_quantity);
    let updater = PriceUpdater::new(sink, Pacing::from_config(config));
    let summary = updater.update_prices(&records).await;
    report::print_price_summary(&summary);
    Ok(())
}

/// Prints the shop's product count.
///
/// # Errors
///
/// Returns an error if credentials are missing or the request fails.
pub(crate) async fn run_check(config: &AppConfig) -> anyhow::Result<()> {
    let client = admin_client(config)?;
    let count = client.product_count().await?;
    println!("shop: {}", client.shop_domain());
    println!("products: {count}");
    Ok(())
}
