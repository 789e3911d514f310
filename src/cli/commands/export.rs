//! `hoscon export` command - snapshot every table to disk

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::print_json;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::export_all;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output directory (overrides --export-dir and config)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let dir = args.output.unwrap_or_else(|| global.config().export_dir());

    let written = export_all(&store, &dir)?;

    match global.format {
        OutputFormat::Json => print_json(&written),
        _ if global.quiet => Ok(()),
        _ => {
            println!(
                "{} Exported {} file(s) to {}",
                style("✓").green(),
                written.len(),
                style(dir.display()).cyan()
            );
            for name in &written {
                println!("   {}", name);
            }
            Ok(())
        }
    }
}
