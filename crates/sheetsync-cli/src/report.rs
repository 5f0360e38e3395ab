//! Plain-text rendering of command results.

use std::collections::HashSet;
use std::path::Path;

use sheetsync_catalog::Reconciliation;
use sheetsync_core::ProductRecord;
use sheetsync_sync::{PriceUpdateSummary, SyncSummary};

use crate::export::ExportPlan;
use crate::upload::SyncPlan;

const RULE: &str = "------------------------------------------------------------";

pub(crate) fn print_export(plan: &ExportPlan, rows: usize, written: usize, path: &Path) {
    println!("rows read:          {rows}");
    println!("models:             {}", plan.models);
    println!("parent rows:        {}", plan.build.parent_rows.len());
    println!("individual rows:    {}", plan.build.individual_rows.len());
    println!("invalid records:    {}", plan.validation.invalid.len());
    println!("written:            {written} -> {}", path.display());

    for failure in &plan.build.failures {
        println!("skipped model {}: {}", failure.label, failure.error);
    }
    for invalid in plan.validation.invalid.iter().take(10) {
        println!(
            "invalid {}: {}",
            display_handle(&invalid.record),
            invalid.reason
        );
    }
    if !plan.duplicate_handles.is_empty() {
        eprintln!(
            "warning: {} handles appear on more than one product:",
            plan.duplicate_handles.len()
        );
        for handle in &plan.duplicate_handles {
            eprintln!("  {handle}");
        }
    }
}

pub(crate) fn print_sync_plan(plan: &SyncPlan) {
    println!("dry-run: would upload");
    println!("  models:              {}", plan.models);
    println!(
        "  parent products:     {} (+{} variants)",
        plan.parents, plan.parent_variants
    );
    println!("  individual products: {}", plan.individuals);
    println!("  total products:      {}", plan.total_products());
    if plan.handle_failures > 0 {
        println!("  models without valid handles: {}", plan.handle_failures);
    }
}

pub(crate) fn print_sync_summary(summary: &SyncSummary, shop: &str) {
    println!("{RULE}");
    println!("sync summary for {shop}");
    println!("{RULE}");
    println!("models processed:   {}", summary.models_processed());
    println!("parents created:    {}", summary.parents_succeeded());
    println!("parents failed:     {}", summary.parents_failed());
    println!("variant failures:   {}", summary.variant_failures());
    println!("individuals created: {}", summary.individuals_succeeded());
    println!("individuals failed:  {}", summary.individuals_failed());

    let elapsed = summary.elapsed().num_seconds();
    println!("elapsed:            {}m {}s", elapsed / 60, elapsed % 60);

    let total_errors = summary.total_errors();
    if total_errors > 0 {
        println!();
        println!("errors: {total_errors} (first few below)");
        for (label, errors) in summary.error_preview() {
            println!("  {label}");
            for error in errors {
                println!("    - {error}");
            }
        }
    }
    println!("{RULE}");
}

pub(crate) fn print_price_plan(records: &[ProductRecord]) {
    let priced: Vec<&ProductRecord> = records
        .iter()
        .filter(|r| !r.handle.is_empty() && !r.variant_price.is_empty())
        .collect();
    let handles: HashSet<&str> = priced.iter().map(|r| r.handle.as_str()).collect();
    println!(
        "dry-run: would update {} prices across {} handles",
        priced.len(),
        handles.len()
    );
}

pub(crate) fn print_price_summary(summary: &PriceUpdateSummary) {
    println!("prices updated:   {}", summary.updated);
    println!("not found:        {}", summary.not_found);
    println!("failed:           {}", summary.failed);
    println!("skipped:          {}", summary.skipped);
    for error in summary.errors.iter().take(10) {
        println!("  - {error}");
    }
}

pub(crate) fn print_reconciliation(reconciliation: &Reconciliation, path: &Path) {
    println!("records updated:   {}", reconciliation.updated);
    println!("records unmatched: {}", reconciliation.not_found);
    println!("records dropped:   {}", reconciliation.dropped);
    println!(
        "written:           {} -> {}",
        reconciliation.records.len(),
        path.display()
    );
}

fn display_handle(record: &ProductRecord) -> &str {
    if record.handle.is_empty() {
        "(no handle)"
    } else {
        &record.handle
    }
}
