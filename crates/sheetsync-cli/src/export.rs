use std::path::Path;

use sheetsync_catalog::{
    find_duplicate_handles, group_by_model, validate_products, write_products_csv, CatalogBuild,
    Transformer, Validation,
};
use sheetsync_core::{AppConfig, PriceRow};

use crate::report;
use crate::source::{load_rows, load_transformer};

/// Everything `export` produces before touching the filesystem.
pub(crate) struct ExportPlan {
    pub models: usize,
    pub build: CatalogBuild,
    pub validation: Validation,
    pub duplicate_handles: Vec<String>,
}

/// Groups, transforms and validates `rows`.
pub(crate) fn plan_export(transformer: &Transformer, rows: &[PriceRow]) -> ExportPlan {
    let groups = group_by_model(rows);
    let build = transformer.transform_all(&groups);
    let records = build.records();
    let duplicate_handles = find_duplicate_handles(&records);
    let validation = validate_products(records);
    ExportPlan {
        models: groups.len(),
        build,
        validation,
        duplicate_handles,
    }
}

/// Writes the valid records of the current sheet to the import CSV.
///
/// # Errors
///
/// Returns an error if the rows cannot be loaded, the profile is invalid, or
/// the CSV cannot be written.
pub(crate) async fn run_export(
    config: &AppConfig,
    input: Option<&Path>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let transformer = load_transformer(config)?;
    let rows = load_rows(config, input).await?;
    let plan = plan_export(&transformer, &rows);

    let path = output.unwrap_or(config.output_csv_path.as_path());
    let written = write_products_csv(&plan.validation.valid, path)?;

    report::print_export(&plan, rows.len(), written, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsync_core::CatalogProfile;

    fn row(brand: &str, model: &str, code: &str, size: &str, price: &str) -> PriceRow {
        let opt = |s: &str| Some(s.to_owned()).filter(|v| !v.is_empty());
        PriceRow {
            code: opt(code),
            brand: opt(brand),
            model: opt(model),
            size: opt(size),
            price_with_tax: opt(price),
            ..PriceRow::default()
        }
    }

    #[test]
    fn plan_counts_parents_and_individuals() {
        let rows = vec![
            row("Acme", "X1", "C1", "10", "100"),
            row("Acme", "X1", "C2", "20", "120"),
            row("Beta", "Y", "B1", "30", "90"),
        ];
        let plan = plan_export(&Transformer::new(CatalogProfile::default()), &rows);

        assert_eq!(plan.models, 2);
        assert_eq!(plan.build.parent_rows.len(), 3);
        assert_eq!(plan.build.individual_rows.len(), 3);
        assert_eq!(plan.validation.valid.len(), 6);
        assert!(plan.validation.invalid.is_empty());
        assert!(plan.duplicate_handles.is_empty());
    }

    #[test]
    fn plan_flags_missing_prices_and_duplicate_handles() {
        let rows = vec![
            row("Acme", "X1", "", "", ""),
            row("Acme", "X1", "", "", "100"),
        ];
        let plan = plan_export(&Transformer::new(CatalogProfile::default()), &rows);

        assert_eq!(plan.duplicate_handles, vec!["acme-x1-i".to_owned()]);
        assert!(plan
            .validation
            .invalid
            .iter()
            .any(|invalid| invalid.reason == "price required"));
    }
}
