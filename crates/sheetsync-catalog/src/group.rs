use std::collections::HashMap;

use sheetsync_core::PriceRow;

/// All price rows for one (brand, model) pair, in sheet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGroup {
    pub brand: String,
    pub model: String,
    pub variants: Vec<PriceRow>,
}

impl ModelGroup {
    /// `"{brand} {model}"`, used in logs and reports.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Returns a new group holding at most the first `max` rows.
    #[must_use]
    pub fn truncated(&self, max: usize) -> ModelGroup {
        ModelGroup {
            brand: self.brand.clone(),
            model: self.model.clone(),
            variants: self.variants.iter().take(max).cloned().collect(),
        }
    }
}

/// Groups rows by trimmed (brand, model), preserving first-seen order.
///
/// Rows with an empty brand or model are skipped with a warning. Rows are
/// never reordered or deduplicated within a group.
#[must_use]
pub fn group_by_model(rows: &[PriceRow]) -> Vec<ModelGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<ModelGroup> = Vec::new();

    for row in rows {
        let brand = row.brand_text().trim();
        let model = row.model_text().trim();
        if brand.is_empty() || model.is_empty() {
            tracing::warn!(
                sheet_row = row.sheet_row,
                code = row.code_text(),
                "skipping row without brand or model"
            );
            continue;
        }

        let key = format!("{brand}|{model}");
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(ModelGroup {
                brand: brand.to_string(),
                model: model.to_string(),
                variants: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].variants.push(row.clone());
    }

    groups
}
