//! `hoscon dept` command - department status board

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{print_done, print_json, resolve_department};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::DepartmentFilter;
use crate::core::DepartmentStatus;
use crate::entities::{Department, DepartmentUpdate, NewDepartment};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("status", "STATUS", 8),
    ColumnDef::new("notes", "NOTES", 40),
];

#[derive(Subcommand, Debug)]
pub enum DeptCommands {
    /// List departments and their status
    List(ListArgs),

    /// Register a department
    Add(AddArgs),

    /// Change a department's status, notes or name
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only departments with this status (green, yellow, red)
    #[arg(long, short = 's')]
    pub status: Option<DepartmentStatus>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Department name (must be unique)
    #[arg(long, short = 'n')]
    pub name: String,

    /// Initial status
    #[arg(long, short = 's', default_value = "Green")]
    pub status: DepartmentStatus,

    /// Operator notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Department id or name
    pub department: String,

    /// New status
    #[arg(long, short = 's')]
    pub status: Option<DepartmentStatus>,

    /// Replace the notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Rename the department
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run(cmd: DeptCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DeptCommands::List(args) => run_list(args, global),
        DeptCommands::Add(args) => run_add(args, global),
        DeptCommands::Update(args) => run_update(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let departments = store.list_departments(&DepartmentFilter {
        status: args.status,
    })?;

    if global.format == OutputFormat::Json {
        return print_json(&departments);
    }

    TableFormatter::new(COLUMNS, "department")
        .quiet(global.quiet)
        .output(departments.iter().map(row), global.format);
    Ok(())
}

fn row(dept: &Department) -> TableRow {
    TableRow::new(dept.id)
        .cell("id", CellValue::Id(dept.id))
        .cell("name", CellValue::Text(dept.name.clone()))
        .cell("status", CellValue::Light(dept.status))
        .cell("notes", CellValue::OptText(dept.notes.clone()))
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let mut new = NewDepartment::new(args.name, args.status);
    new.notes = args.notes;

    let dept = store.create_department(new)?;
    print_done(global.quiet, "Added department", &dept.name, dept.id);
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let id = resolve_department(&store, &args.department)?;

    let dept = store.update_department(
        id,
        DepartmentUpdate {
            name: args.name,
            status: args.status,
            notes: args.notes,
        },
    )?;
    print_done(
        global.quiet,
        "Updated department",
        &format!("{} ({})", dept.name, dept.status),
        dept.id,
    );
    Ok(())
}
