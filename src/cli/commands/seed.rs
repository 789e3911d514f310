//! `hoscon seed` command - load the baseline demo data

use console::style;
use miette::Result;

use crate::cli::helpers::print_json;
use crate::cli::{GlobalOpts, OutputFormat};

pub fn run(global: &GlobalOpts) -> Result<()> {
    let mut store = global.open_store()?;
    let report = store.seed_if_absent()?;

    if global.format == OutputFormat::Json {
        return print_json(&report);
    }
    if global.quiet {
        return Ok(());
    }

    if report.total() == 0 {
        println!("{} Baseline data already present", style("✓").green());
        return Ok(());
    }

    println!("{} Seeded baseline data", style("✓").green());
    for (label, count) in [
        ("departments", report.departments),
        ("staff", report.staff),
        ("incidents", report.incidents),
        ("resources", report.resources),
    ] {
        println!("   {:<12} {}", label, style(count).cyan());
    }
    Ok(())
}
