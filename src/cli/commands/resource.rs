//! `hoscon resource` command - supplies and equipment

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{print_done, print_json, resolve_resource};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::ResourceFilter;
use crate::entities::{NewResource, Resource, ResourceUpdate};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("quantity", "QTY", 8),
    ColumnDef::new("unit", "UNIT", 10),
];

#[derive(Subcommand, Debug)]
pub enum ResourceCommands {
    /// List resources
    List(ListArgs),

    /// Register a resource
    Add(AddArgs),

    /// Change the quantity or unit on hand
    Update(UpdateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Substring match on the name
    #[arg(long)]
    pub search: Option<String>,

    /// Only resources running low
    #[arg(long, conflicts_with = "search")]
    pub low: bool,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Resource name (must be unique)
    #[arg(long, short = 'n')]
    pub name: String,

    /// Quantity on hand
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub quantity: i64,

    /// Unit of measure, e.g. units or pairs
    #[arg(long, short = 'u')]
    pub unit: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Resource id or name
    pub resource: String,

    /// New quantity
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Option<i64>,

    /// New unit
    #[arg(long, short = 'u')]
    pub unit: Option<String>,
}

pub fn run(cmd: ResourceCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ResourceCommands::List(args) => run_list(args, global),
        ResourceCommands::Add(args) => run_add(args, global),
        ResourceCommands::Update(args) => run_update(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let resources = if args.low {
        store.low_stock_resources()?
    } else {
        store.list_resources(&ResourceFilter {
            search: args.search,
        })?
    };

    if global.format == OutputFormat::Json {
        return print_json(&resources);
    }

    TableFormatter::new(COLUMNS, "resource")
        .quiet(global.quiet)
        .output(resources.iter().map(row), global.format);
    Ok(())
}

fn row(resource: &Resource) -> TableRow {
    TableRow::new(resource.id)
        .cell("id", CellValue::Id(resource.id))
        .cell("name", CellValue::Text(resource.name.clone()))
        .cell("quantity", CellValue::Number(resource.quantity))
        .cell("unit", CellValue::Text(resource.unit.clone()))
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let resource = store.create_resource(NewResource::new(args.name, args.quantity, args.unit))?;
    print_done(global.quiet, "Added resource", &resource.name, resource.id);
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let id = resolve_resource(&store, &args.resource)?;

    let resource = store.update_resource(
        id,
        ResourceUpdate {
            quantity: args.quantity,
            unit: args.unit,
        },
    )?;
    print_done(
        global.quiet,
        "Updated resource",
        &format!("{} ({} {})", resource.name, resource.quantity, resource.unit),
        resource.id,
    );
    Ok(())
}
