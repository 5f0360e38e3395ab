//! Model-by-model upload: parent family first, then the individuals.
//!
//! Every call is awaited in order. A failed call is recorded on the model's
//! [`SyncResult`] and the run moves on; nothing here returns an error.

use chrono::Utc;
use sheetsync_catalog::{group_by_model, ModelGroup, Transformer};
use sheetsync_core::{PriceRow, ProductRecord};

use crate::pacing::{pause, Pacing};
use crate::result::{ParentStatus, SyncResult, SyncSummary};
use crate::sink::{ProductSink, UploadResult};

pub struct Orchestrator<S> {
    sink: S,
    transformer: Transformer,
    pacing: Pacing,
}

impl<S: ProductSink> Orchestrator<S> {
    pub fn new(sink: S, transformer: Transformer, pacing: Pacing) -> Self {
        Self {
            sink,
            transformer,
            pacing,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Groups `rows` by model and syncs every group in discovery order.
    pub async fn sync_models(&self, rows: &[PriceRow]) -> SyncSummary {
        let groups = group_by_model(rows);
        self.sync_groups(&groups).await
    }

    /// Syncs already-grouped models, pausing between consecutive ones.
    pub async fn sync_groups(&self, groups: &[ModelGroup]) -> SyncSummary {
        let started_at = Utc::now();
        tracing::info!(models = groups.len(), "starting sync");

        let mut results = Vec::with_capacity(groups.len());
        for (index, group) in groups.iter().enumerate() {
            if index > 0 {
                pause(self.pacing.between_models).await;
            }
            tracing::info!(
                model = %group.label(),
                position = index + 1,
                total = groups.len(),
                "syncing model"
            );
            results.push(self.sync_model(group).await);
        }

        let summary = SyncSummary {
            started_at,
            finished_at: Utc::now(),
            results,
        };
        tracing::info!(
            models = summary.models_processed(),
            parents_succeeded = summary.parents_succeeded(),
            parents_failed = summary.parents_failed(),
            individuals_succeeded = summary.individuals_succeeded(),
            individuals_failed = summary.individuals_failed(),
            "sync finished"
        );
        summary
    }

    /// Transforms and uploads one model.
    ///
    /// A failed parent (including a handle error) skips the individuals and
    /// leaves a single `Parent: …` error on the result.
    pub async fn sync_model(&self, group: &ModelGroup) -> SyncResult {
        let label = group.label();
        let mut result = SyncResult::new(&label);

        let transformed = match self.transformer.transform_model(group) {
            Ok(transformed) => transformed,
            Err(e) => {
                tracing::warn!(model = %label, error = %e, "cannot build handles for model");
                result.parent = ParentStatus::Failed;
                result.errors.push(format!("Parent: {e}"));
                return result;
            }
        };

        if let Some((primary, variants)) = transformed.parent_rows.split_first() {
            match self.sink.create_product(primary).await {
                UploadResult::Created {
                    product_id,
                    mut variant_ids,
                } => {
                    for row in variants {
                        pause(self.pacing.call).await;
                        self.append_variant(product_id, row, &mut variant_ids, &mut result)
                            .await;
                    }
                    tracing::info!(
                        model = %label,
                        product_id,
                        variants = variant_ids.len(),
                        "parent created"
                    );
                    result.parent = ParentStatus::Created {
                        product_id,
                        variant_ids,
                    };
                }
                UploadResult::Failed { error } => {
                    tracing::warn!(model = %label, error = %error, "parent creation failed");
                    result.parent = ParentStatus::Failed;
                    result.errors.push(format!("Parent: {error}"));
                    return result;
                }
            }
            pause(self.pacing.parent_to_individual).await;
        }

        for (index, row) in transformed.individual_rows.iter().enumerate() {
            if index > 0 {
                pause(self.pacing.call).await;
            }
            match self.sink.create_product(row).await {
                UploadResult::Created { product_id, .. } => {
                    tracing::debug!(title = %row.title, product_id, "individual created");
                    result.individuals_success += 1;
                }
                UploadResult::Failed { error } => {
                    tracing::warn!(title = %row.title, error = %error, "individual creation failed");
                    result.individuals_failed += 1;
                    result.errors.push(format!("Individual {}: {error}", row.title));
                }
            }
        }

        tracing::info!(
            model = %label,
            created = result.individuals_success,
            failed = result.individuals_failed,
            "individuals done"
        );
        result
    }

    async fn append_variant(
        &self,
        product_id: i64,
        row: &ProductRecord,
        variant_ids: &mut Vec<i64>,
        result: &mut SyncResult,
    ) {
        match self.sink.add_variant(product_id, row).await {
            UploadResult::Created {
                variant_ids: created,
                ..
            } => variant_ids.extend(created),
            UploadResult::Failed { error } => {
                tracing::warn!(
                    product_id,
                    option = %row.option1_value,
                    error = %error,
                    "variant append failed"
                );
                result.variant_failures += 1;
                result
                    .errors
                    .push(format!("Variant {}: {error}", row.option1_value));
            }
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
