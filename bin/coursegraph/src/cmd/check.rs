//! Check command - validate course, unit and page references

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr, bail};
use coursegraph_store::{Catalog, CheckReport, ContentStore};

use super::load_config;

/// Run the check command.
///
/// Loads the index, then checks every course. Fails on errors, and on
/// warnings in strict mode.
pub async fn run(config_path: &Path, root: Option<&Path>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking content");

    println!("Checking configuration...");
    let config = load_config(config_path, root)?;
    println!("  ✓ Configuration valid");

    println!("\nBuilding content index...");
    let store = ContentStore::open(&config)
        .await
        .wrap_err("Failed to build the content index")?;
    let entries = store.index().await.len();
    println!("  ✓ {entries} indexed item(s)");

    println!("\nChecking courses...");
    let report = Catalog::new(Arc::new(store)).check().await;
    println!("  ✓ {} course(s) checked", report.courses);

    print_summary(&report);

    let errors = report.errors().count();
    if errors > 0 {
        bail!("Validation failed with {errors} error(s)");
    }

    let warnings = report.warnings().count();
    if strict && warnings > 0 {
        bail!("Validation failed with {warnings} warning(s) (strict mode)");
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn print_summary(report: &CheckReport) {
    println!();
    println!("Summary:");
    println!("  Errors:   {}", report.errors().count());
    println!("  Warnings: {}", report.warnings().count());

    if report.has_errors() {
        println!();
        println!("Errors:");
        for finding in report.errors() {
            println!("  ✗ {}", finding.message);
        }
    }

    if report.has_warnings() {
        println!();
        println!("Warnings:");
        for finding in report.warnings() {
            println!("  ⚠ {}", finding.message);
        }
    }
}
