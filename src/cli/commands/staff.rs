//! `hoscon staff` command - roster and muster

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{print_done, print_json, resolve_department, resolve_staff};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::StaffFilter;
use crate::entities::{NewStaff, StaffUpdate, StaffWithDepartment};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 24),
    ColumnDef::new("role", "ROLE", 16),
    ColumnDef::new("department", "DEPARTMENT", 30),
    ColumnDef::new("present", "PRESENT", 8),
];

#[derive(Subcommand, Debug)]
pub enum StaffCommands {
    /// List staff with their department
    List(ListArgs),

    /// Register a staff member
    Add(AddArgs),

    /// Change role, department or presence
    Update(UpdateArgs),

    /// Show everyone checked in at the muster point
    Muster,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only staff currently present
    #[arg(long)]
    pub present: bool,

    /// Only staff in this department (id or name)
    #[arg(long, short = 'd')]
    pub department: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Full name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Role, e.g. Nurse or Doctor
    #[arg(long, short = 'r')]
    pub role: String,

    /// Department id or name (must exist)
    #[arg(long, short = 'd')]
    pub department: String,

    /// Mark as present at the muster point
    #[arg(long)]
    pub present: bool,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Staff id or name
    pub staff: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New role
    #[arg(long, short = 'r')]
    pub role: Option<String>,

    /// Move to another department (id or name)
    #[arg(long, short = 'd')]
    pub department: Option<String>,

    /// Presence at the muster point (true/false)
    #[arg(long)]
    pub present: Option<bool>,
}

pub fn run(cmd: StaffCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        StaffCommands::List(args) => run_list(args, global),
        StaffCommands::Add(args) => run_add(args, global),
        StaffCommands::Update(args) => run_update(args, global),
        StaffCommands::Muster => run_muster(global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let department_id = match args.department {
        Some(ref dept) => Some(resolve_department(&store, dept)?),
        None => None,
    };

    let staff = store.list_staff_with_department(&StaffFilter {
        present: args.present.then_some(true),
        department_id,
    })?;
    output(&staff, global)
}

fn run_muster(global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let staff = store.present_staff()?;
    output(&staff, global)
}

fn output(staff: &[StaffWithDepartment], global: &GlobalOpts) -> Result<()> {
    if global.format == OutputFormat::Json {
        return print_json(staff);
    }

    TableFormatter::new(COLUMNS, "staff member")
        .quiet(global.quiet)
        .output(staff.iter().map(row), global.format);
    Ok(())
}

fn row(staff: &StaffWithDepartment) -> TableRow {
    TableRow::new(staff.id)
        .cell("id", CellValue::Id(staff.id))
        .cell("name", CellValue::Text(staff.name.clone()))
        .cell("role", CellValue::Text(staff.role.clone()))
        .cell("department", CellValue::OptText(staff.department.clone()))
        .cell("present", CellValue::Present(staff.present))
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let department_id = resolve_department(&store, &args.department)?;

    let staff = store.create_staff(
        NewStaff::new(args.name, args.role, department_id).present(args.present),
    )?;
    print_done(global.quiet, "Added staff member", &staff.name, staff.id);
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let id = resolve_staff(&store, &args.staff)?;
    let department_id = match args.department {
        Some(ref dept) => Some(resolve_department(&store, dept)?),
        None => None,
    };

    let staff = store.update_staff(
        id,
        StaffUpdate {
            name: args.name,
            role: args.role,
            department_id,
            present: args.present,
        },
    )?;
    print_done(global.quiet, "Updated staff member", &staff.name, staff.id);
    Ok(())
}
