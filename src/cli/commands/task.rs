//! `hoscon task` command - tasks raised against incidents

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{print_done, print_json, resolve_staff};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::TaskFilter;
use crate::core::TaskStatus;
use crate::entities::{NewTask, TaskUpdate, TaskWithAssignee};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("incident", "INCIDENT", 9),
    ColumnDef::new("title", "TITLE", 36),
    ColumnDef::new("assigned", "ASSIGNED", 24),
    ColumnDef::new("status", "STATUS", 12),
    ColumnDef::new("timestamp", "UPDATED", 18),
];

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks with their assignee
    List(ListArgs),

    /// Add a task to an incident
    Add(AddArgs),

    /// Change status, title or assignee
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only tasks for this incident
    #[arg(long, short = 'i')]
    pub incident: Option<i64>,

    /// Filter by status (open, in-progress, completed)
    #[arg(long, short = 's')]
    pub status: Option<TaskStatus>,

    /// Only tasks assigned to this staff member (id or name)
    #[arg(long, short = 'a')]
    pub assigned_to: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Incident the task belongs to
    #[arg(long, short = 'i')]
    pub incident: i64,

    /// Task title
    #[arg(long, short = 't')]
    pub title: String,

    /// Assign to a staff member (id or name)
    #[arg(long, short = 'a')]
    pub assign_to: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Task id
    pub id: i64,

    /// New status
    #[arg(long, short = 's')]
    pub status: Option<TaskStatus>,

    /// New title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Reassign to a staff member (id or name)
    #[arg(long, short = 'a', conflicts_with = "unassign")]
    pub assign_to: Option<String>,

    /// Remove the assignee
    #[arg(long)]
    pub unassign: bool,
}

pub fn run(cmd: TaskCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TaskCommands::List(args) => run_list(args, global),
        TaskCommands::Add(args) => run_add(args, global),
        TaskCommands::Update(args) => run_update(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let assigned_to = match args.assigned_to {
        Some(ref staff) => Some(resolve_staff(&store, staff)?),
        None => None,
    };

    let tasks = store.list_tasks_with_assignee(&TaskFilter {
        incident_id: args.incident,
        status: args.status,
        assigned_to,
    })?;

    if global.format == OutputFormat::Json {
        return print_json(&tasks);
    }

    TableFormatter::new(COLUMNS, "task")
        .quiet(global.quiet)
        .output(tasks.iter().map(row), global.format);
    Ok(())
}

fn row(entry: &TaskWithAssignee) -> TableRow {
    let task = &entry.task;
    TableRow::new(task.id)
        .cell("id", CellValue::Id(task.id))
        .cell("incident", CellValue::Number(task.incident_id))
        .cell("title", CellValue::Text(task.title.clone()))
        .cell("assigned", CellValue::OptText(entry.assigned_staff.clone()))
        .cell("status", CellValue::TaskStatus(task.status))
        .cell("timestamp", CellValue::DateTime(task.timestamp))
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let incident = store.get_incident(args.incident)?;

    let mut new = NewTask::new(incident.id, args.title);
    if let Some(ref staff) = args.assign_to {
        new = new.assigned_to(resolve_staff(&store, staff)?);
    }

    let task = store.create_task(new)?;
    print_done(
        global.quiet,
        "Added task",
        &format!("'{}' to incident #{}", task.title, task.incident_id),
        task.id,
    );
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let assigned_to = if args.unassign {
        Some(None)
    } else {
        match args.assign_to {
            Some(ref staff) => Some(Some(resolve_staff(&store, staff)?)),
            None => None,
        }
    };

    let task = store.update_task(
        args.id,
        TaskUpdate {
            title: args.title,
            assigned_to,
            status: args.status,
        },
    )?;
    print_done(
        global.quiet,
        "Updated task",
        &format!("'{}' ({})", task.title, task.status),
        task.id,
    );
    Ok(())
}
