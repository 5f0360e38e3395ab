use chrono::{DateTime, Utc};

/// Models shown in [`SyncSummary::error_preview`].
pub const PREVIEW_MODELS: usize = 5;
/// Errors shown per model in [`SyncSummary::error_preview`].
pub const PREVIEW_ERRORS_PER_MODEL: usize = 2;

/// What happened to a model's parent family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentStatus {
    Created {
        product_id: i64,
        variant_ids: Vec<i64>,
    },
    Failed,
    /// The catalog profile skipped the parent for this model.
    NotRequested,
}

/// Per-model outcome of a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// `"{brand} {model}"`.
    pub label: String,
    pub parent: ParentStatus,
    pub individuals_success: usize,
    pub individuals_failed: usize,
    pub variant_failures: usize,
    /// In the order they happened.
    pub errors: Vec<String>,
}

impl SyncResult {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            parent: ParentStatus::NotRequested,
            individuals_success: 0,
            individuals_failed: 0,
            variant_failures: 0,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn parent_success(&self) -> bool {
        matches!(self.parent, ParentStatus::Created { .. })
    }

    #[must_use]
    pub fn parent_failed(&self) -> bool {
        self.parent == ParentStatus::Failed
    }

    /// Variants attached to the parent, counting the one created with it.
    #[must_use]
    pub fn parent_variant_count(&self) -> usize {
        match &self.parent {
            ParentStatus::Created { variant_ids, .. } => variant_ids.len(),
            ParentStatus::Failed | ParentStatus::NotRequested => 0,
        }
    }
}

/// Totals across one run.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<SyncResult>,
}

impl SyncSummary {
    #[must_use]
    pub fn models_processed(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn parents_succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.parent_success()).count()
    }

    #[must_use]
    pub fn parents_failed(&self) -> usize {
        self.results.iter().filter(|r| r.parent_failed()).count()
    }

    #[must_use]
    pub fn individuals_succeeded(&self) -> usize {
        self.results.iter().map(|r| r.individuals_success).sum()
    }

    #[must_use]
    pub fn individuals_failed(&self) -> usize {
        self.results.iter().map(|r| r.individuals_failed).sum()
    }

    #[must_use]
    pub fn variant_failures(&self) -> usize {
        self.results.iter().map(|r| r.variant_failures).sum()
    }

    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.results.iter().map(|r| r.errors.len()).sum()
    }

    /// First [`PREVIEW_MODELS`] models with errors, each with at most
    /// [`PREVIEW_ERRORS_PER_MODEL`] of them.
    #[must_use]
    pub fn error_preview(&self) -> Vec<(&str, &[String])> {
        self.results
            .iter()
            .filter(|r| !r.errors.is_empty())
            .take(PREVIEW_MODELS)
            .map(|r| {
                let shown = r.errors.len().min(PREVIEW_ERRORS_PER_MODEL);
                (r.label.as_str(), &r.errors[..shown])
            })
            .collect()
    }

    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
