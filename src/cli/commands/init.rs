//! `hoscon init` command - create the database and its tables

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let tables = store.table_names()?;

    if global.quiet {
        return Ok(());
    }

    let location = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());
    println!(
        "{} Database ready at {}",
        style("✓").green(),
        style(location).cyan()
    );
    for table in &tables {
        println!("   {}", style(table).dim());
    }
    println!();
    println!("Next steps:");
    println!("  {} Load the demo data", style("hoscon seed").yellow());
    println!("  {} Show the dashboard", style("hoscon status").yellow());
    Ok(())
}
