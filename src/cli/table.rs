//! Table formatting utilities for CLI list commands
//!
//! Every list command builds [`TableRow`]s of typed [`CellValue`]s and hands
//! them to a [`TableFormatter`], which renders them as a boxed table
//! (`auto`), aligned TSV, CSV, Markdown or bare ids. JSON output is handled
//! by the commands themselves from the typed records.

use chrono::{DateTime, Local, Utc};
use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;
use crate::core::{DepartmentStatus, IncidentStatus, Priority, TaskStatus};

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Row id
    Id(i64),
    /// Plain text, truncated in TSV output
    Text(String),
    /// Optional text (displays "-" if None)
    OptText(Option<String>),
    /// Department traffic light
    Light(DepartmentStatus),
    Priority(Priority),
    IncidentStatus(IncidentStatus),
    TaskStatus(TaskStatus),
    /// Muster flag
    Present(bool),
    /// Timestamp displayed in local time
    DateTime(DateTime<Utc>),
    Number(i64),
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => format!("{:<width$}", style(id).cyan(), width = width),
            CellValue::Text(s) => {
                format!("{:<width$}", truncate_str(s, width.saturating_sub(2)), width = width)
            }
            CellValue::OptText(None) => format!("{:<width$}", style("-").dim(), width = width),
            CellValue::OptText(Some(s)) => CellValue::Text(s.clone()).format_tsv(width),
            CellValue::Light(status) => {
                let s = status.to_string();
                let styled = match status {
                    DepartmentStatus::Green => style(s).green(),
                    DepartmentStatus::Yellow => style(s).yellow(),
                    DepartmentStatus::Red => style(s).red().bold(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Priority(priority) => {
                let s = priority.to_string();
                let styled = match priority {
                    Priority::Low => style(s).dim(),
                    Priority::Medium => style(s).white(),
                    Priority::High => style(s).yellow(),
                    Priority::Critical => style(s).red().bold(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::IncidentStatus(status) => {
                let s = status.to_string();
                let styled = match status {
                    IncidentStatus::Open => style(s).yellow(),
                    IncidentStatus::InProgress => style(s).cyan(),
                    IncidentStatus::Resolved => style(s).green(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::TaskStatus(status) => {
                let s = status.to_string();
                let styled = match status {
                    TaskStatus::Open => style(s).yellow(),
                    TaskStatus::InProgress => style(s).cyan(),
                    TaskStatus::Completed => style(s).green(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Present(present) => {
                let styled = if *present {
                    style("yes").green()
                } else {
                    style("no").dim()
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::DateTime(_) => format!("{:<width$}", self.raw(), width = width),
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::OptText(Some(s)) => escape_csv(s),
            CellValue::OptText(None) => String::new(),
            CellValue::Present(b) => b.to_string(),
            CellValue::DateTime(dt) => dt.to_rfc3339(),
            _ => self.raw(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Present(true) => "**yes**".to_string(),
            _ => self.display(),
        };
        raw.replace('|', "\\|")
    }

    /// Human-readable text without colors
    pub fn display(&self) -> String {
        match self {
            CellValue::OptText(None) => "-".to_string(),
            CellValue::Present(true) => "yes".to_string(),
            CellValue::Present(false) => "no".to_string(),
            _ => self.raw(),
        }
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(id) => id.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::OptText(opt) => opt.clone().unwrap_or_default(),
            CellValue::Light(status) => status.to_string(),
            CellValue::Priority(priority) => priority.to_string(),
            CellValue::IncidentStatus(status) => status.to_string(),
            CellValue::TaskStatus(status) => status.to_string(),
            CellValue::Present(b) => b.to_string(),
            CellValue::DateTime(dt) => {
                let local: DateTime<Local> = dt.with_timezone(&Local);
                local.format("%Y-%m-%d %H:%M").to_string()
            }
            CellValue::Number(n) => n.to_string(),
        }
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::DateTime(_) => 16, // "YYYY-MM-DD HH:MM"
            _ => self.display().chars().count(),
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub id: i64,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    show_summary: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            show_summary: true,
        }
    }

    /// Suppress the "N found" line
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.show_summary = !quiet;
        self
    }

    /// Output rows in the specified format
    pub fn output<I>(&self, rows: I, format: OutputFormat)
    where
        I: IntoIterator<Item = TableRow>,
    {
        let rows: Vec<TableRow> = rows.into_iter().collect();

        match format {
            OutputFormat::Tsv => self.output_tsv(&rows),
            OutputFormat::Csv => self.output_csv(&rows),
            OutputFormat::Md => println!("{}", self.render(&rows, true)),
            OutputFormat::Id => {
                for row in &rows {
                    println!("{}", row.id);
                }
            }
            OutputFormat::Auto | OutputFormat::Json => self.output_table(&rows),
        }
    }

    fn output_table(&self, rows: &[TableRow]) {
        if rows.is_empty() {
            if self.show_summary {
                println!("No {} records found.", self.entity_name);
            }
            return;
        }
        println!("{}", self.render(rows, false));
        if self.show_summary {
            println!("{} {}(s) found.", style(rows.len()).cyan(), self.entity_name);
        }
    }

    /// Build a tabled table, boxed or as Markdown
    fn render(&self, rows: &[TableRow], markdown: bool) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().map(|c| c.header.to_string()));
        for row in rows {
            builder.push_record(self.columns.iter().map(|col| match row.get(col.key) {
                Some(value) => value.format_md(),
                None => "-".to_string(),
            }));
        }

        let mut table = builder.build();
        if markdown {
            table.with(Style::markdown());
        } else {
            table.with(Style::rounded());
        }
        table.to_string()
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                col.header.len().max(max_content.saturating_add(2)).min(col.width)
            })
            .collect()
    }

    fn output_tsv(&self, rows: &[TableRow]) {
        let widths = self.calculate_widths(rows);

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = w))
            .collect();
        println!("{}", header.join(" "));

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        println!("{}", "-".repeat(total_width));

        for row in rows {
            let parts: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| match row.get(col.key) {
                    Some(value) => value.format_tsv(*w),
                    None => format!("{:<width$}", "-", width = w),
                })
                .collect();
            println!("{}", parts.join(" "));
        }

        if self.show_summary {
            println!();
            println!("{} {}(s) found.", style(rows.len()).cyan(), self.entity_name);
        }
    }

    fn output_csv(&self, rows: &[TableRow]) {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.key).collect();
        println!("{}", headers.join(","));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| row.get(col.key).map(|v| v.format_csv()).unwrap_or_default())
                .collect();
            println!("{}", values.join(","));
        }
    }
}
