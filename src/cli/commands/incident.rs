//! `hoscon incident` command - incident log

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{print_done, print_json, resolve_staff};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::IncidentFilter;
use crate::core::{IncidentStatus, Priority};
use crate::entities::{
    Incident, IncidentUpdate, InitialTask, NewIncident, DEFAULT_INITIAL_TASK_TITLE,
};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("type", "TYPE", 22),
    ColumnDef::new("description", "DESCRIPTION", 44),
    ColumnDef::new("priority", "PRIORITY", 10),
    ColumnDef::new("status", "STATUS", 12),
    ColumnDef::new("timestamp", "LOGGED", 18),
];

#[derive(Subcommand, Debug)]
pub enum IncidentCommands {
    /// List incidents
    List(ListArgs),

    /// Log an incident together with its first task
    Log(LogArgs),

    /// Change an incident's priority, status or details
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status (open, in-progress, resolved)
    #[arg(long, short = 's')]
    pub status: Option<IncidentStatus>,

    /// Filter by priority (low, medium, high, critical)
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Hide resolved incidents
    #[arg(long, conflicts_with = "status")]
    pub active: bool,
}

#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Incident type, e.g. Fire or Power Outage
    #[arg(long = "type", short = 't')]
    pub incident_type: String,

    /// What happened
    #[arg(long, short = 'd')]
    pub description: String,

    /// Priority
    #[arg(long, short = 'p', default_value = "Medium")]
    pub priority: Priority,

    /// Title of the first task
    #[arg(long, default_value = DEFAULT_INITIAL_TASK_TITLE)]
    pub task: String,

    /// Assign the first task to this staff member (id or name)
    #[arg(long)]
    pub assign_to: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Incident id
    pub id: i64,

    /// New status
    #[arg(long, short = 's')]
    pub status: Option<IncidentStatus>,

    /// New priority
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// New type
    #[arg(long = "type", short = 't')]
    pub incident_type: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

pub fn run(cmd: IncidentCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        IncidentCommands::List(args) => run_list(args, global),
        IncidentCommands::Log(args) => run_log(args, global),
        IncidentCommands::Update(args) => run_update(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let mut incidents = store.list_incidents(&IncidentFilter {
        status: args.status,
        priority: args.priority,
    })?;
    if args.active {
        incidents.retain(|i| i.status != IncidentStatus::Resolved);
    }

    if global.format == OutputFormat::Json {
        return print_json(&incidents);
    }

    TableFormatter::new(COLUMNS, "incident")
        .quiet(global.quiet)
        .output(incidents.iter().map(row), global.format);
    Ok(())
}

fn row(incident: &Incident) -> TableRow {
    TableRow::new(incident.id)
        .cell("id", CellValue::Id(incident.id))
        .cell("type", CellValue::Text(incident.incident_type.clone()))
        .cell("description", CellValue::Text(incident.description.clone()))
        .cell("priority", CellValue::Priority(incident.priority))
        .cell("status", CellValue::IncidentStatus(incident.status))
        .cell("timestamp", CellValue::DateTime(incident.timestamp))
}

fn run_log(args: LogArgs, global: &GlobalOpts) -> Result<()> {
    let mut store = global.open_store()?;

    let mut task = InitialTask::new(args.task);
    if let Some(ref staff) = args.assign_to {
        task = task.assigned_to(resolve_staff(&store, staff)?);
    }

    let (incident, task) = store.log_incident_with_task(
        NewIncident::new(args.incident_type, args.description, args.priority),
        task,
    )?;

    if global.format == OutputFormat::Json {
        return print_json(&serde_json::json!({ "incident": incident, "task": task }));
    }
    if global.format == OutputFormat::Id {
        println!("{}", incident.id);
        return Ok(());
    }

    print_done(
        global.quiet,
        "Logged incident",
        &format!("{} ({})", incident.incident_type, incident.priority),
        incident.id,
    );
    if !global.quiet {
        println!(
            "   Task {} '{}' opened",
            style(format!("#{}", task.id)).cyan(),
            task.title
        );
    }
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let incident = store.update_incident(
        args.id,
        IncidentUpdate {
            incident_type: args.incident_type,
            description: args.description,
            priority: args.priority,
            status: args.status,
        },
    )?;
    print_done(
        global.quiet,
        "Updated incident",
        &format!("{} ({}, {})", incident.incident_type, incident.priority, incident.status),
        incident.id,
    );
    Ok(())
}
