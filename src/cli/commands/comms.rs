//! `hoscon comms` command - communication log

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::{print_done, print_json};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::CommunicationFilter;
use crate::entities::{CommunicationLog, NewCommunicationLog};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("timestamp", "SENT", 18),
    ColumnDef::new("sender", "FROM", 20),
    ColumnDef::new("recipient", "TO", 20),
    ColumnDef::new("message", "MESSAGE", 48),
    ColumnDef::new("incident", "INCIDENT", 9),
];

#[derive(Subcommand, Debug)]
pub enum CommsCommands {
    /// List logged messages
    List(ListArgs),

    /// Record a message
    Add(AddArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only messages about this incident
    #[arg(long, short = 'i')]
    pub incident: Option<i64>,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Sender
    #[arg(long)]
    pub from: String,

    /// Recipient
    #[arg(long)]
    pub to: String,

    /// Message text
    #[arg(long, short = 'm')]
    pub message: String,

    /// Incident the message is about
    #[arg(long, short = 'i')]
    pub incident: Option<i64>,
}

pub fn run(cmd: CommsCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CommsCommands::List(args) => run_list(args, global),
        CommsCommands::Add(args) => run_add(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let logs = store.list_communication_logs(&CommunicationFilter {
        incident_id: args.incident,
    })?;

    if global.format == OutputFormat::Json {
        return print_json(&logs);
    }

    TableFormatter::new(COLUMNS, "message")
        .quiet(global.quiet)
        .output(logs.iter().map(row), global.format);
    Ok(())
}

fn row(log: &CommunicationLog) -> TableRow {
    TableRow::new(log.id)
        .cell("id", CellValue::Id(log.id))
        .cell("timestamp", CellValue::DateTime(log.timestamp))
        .cell("sender", CellValue::Text(log.sender.clone()))
        .cell("recipient", CellValue::Text(log.recipient.clone()))
        .cell("message", CellValue::Text(log.message.clone()))
        .cell(
            "incident",
            CellValue::OptText(log.incident_id.map(|id| id.to_string())),
        )
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let mut new = NewCommunicationLog::new(args.from, args.to, args.message);
    if let Some(incident_id) = args.incident {
        new = new.about(store.get_incident(incident_id)?.id);
    }

    let log = store.create_communication_log(new)?;
    print_done(
        global.quiet,
        "Logged message",
        &format!("{} -> {}", log.sender, log.recipient),
        log.id,
    );
    Ok(())
}
