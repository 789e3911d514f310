//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::{
    comms::CommsCommands, completions::CompletionsArgs, dept::DeptCommands,
    export::ExportArgs, incident::IncidentCommands, resource::ResourceCommands,
    staff::StaffCommands, task::TaskCommands,
};
use crate::core::logging::Verbosity;
use crate::core::{Config, Store};

#[derive(Parser)]
#[command(name = "hoscon")]
#[command(author, version, about = "Hospital situational awareness console")]
#[command(long_about = "Track department status, staff muster, incidents, tasks and supplies in a local SQLite database.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Database file (default: hoscon_demo.db, or HOSCON_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory for export snapshots (default: exports/, or HOSCON_EXPORT_DIR)
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,
}

impl GlobalOpts {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// Layered configuration with command-line flags applied last
    pub fn config(&self) -> Config {
        let mut config = Config::load();
        config.merge(Config {
            db_path: self.db.clone(),
            export_dir: self.export_dir.clone(),
        });
        config
    }

    /// Open the configured store, creating it if needed
    pub fn open_store(&self) -> Result<Store> {
        Ok(Store::open(self.config().db_path())?)
    }

    /// Resolve `Auto` to the given default
    pub fn format_or(&self, default: OutputFormat) -> OutputFormat {
        match self.format {
            OutputFormat::Auto => default,
            f => f,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and its tables if absent
    Init,

    /// Load the baseline demo data (idempotent)
    Seed,

    /// Show the situational dashboard
    Status,

    /// Department status board
    #[command(subcommand)]
    Dept(DeptCommands),

    /// Staff roster and muster
    #[command(subcommand)]
    Staff(StaffCommands),

    /// Incident log
    #[command(subcommand)]
    Incident(IncidentCommands),

    /// Tasks raised against incidents
    #[command(subcommand)]
    Task(TaskCommands),

    /// Supplies and equipment
    #[command(subcommand)]
    Resource(ResourceCommands),

    /// Communication log
    #[command(subcommand)]
    Comms(CommsCommands),

    /// Export every table to CSV plus a JSON bundle
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table for terminals
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
