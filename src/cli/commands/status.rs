//! `hoscon status` command - situational dashboard

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::print_json;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::{Dashboard, StatusCount, LOW_STOCK_THRESHOLD};

pub fn run(global: &GlobalOpts) -> Result<()> {
    let store = global.open_store()?;
    let dashboard = store.dashboard()?;

    match global.format {
        OutputFormat::Json => print_json(&dashboard),
        OutputFormat::Md => {
            println!("{}", render(&dashboard, true));
            Ok(())
        }
        _ => {
            println!("{}", style("Hospital Status").bold().underlined());
            println!();
            println!("{}", render(&dashboard, false));

            if !dashboard.low_stock.is_empty() {
                println!();
                println!(
                    "{} {} resource(s) below {} units:",
                    style("!").yellow().bold(),
                    dashboard.low_stock.len(),
                    LOW_STOCK_THRESHOLD
                );
                for resource in &dashboard.low_stock {
                    println!(
                        "   {} {} {}",
                        style(&resource.name).yellow(),
                        resource.quantity,
                        resource.unit
                    );
                }
            }
            Ok(())
        }
    }
}

fn render(dashboard: &Dashboard, markdown: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Count"]);
    push_counts(&mut builder, "Departments", &dashboard.departments_by_status);
    builder.push_record([
        "Open incidents".to_string(),
        dashboard.open_incidents.to_string(),
    ]);
    push_counts(&mut builder, "Tasks", &dashboard.tasks_by_status);
    builder.push_record([
        "Staff present".to_string(),
        format!("{} / {}", dashboard.present_staff, dashboard.total_staff),
    ]);
    builder.push_record([
        "Low stock resources".to_string(),
        dashboard.low_stock.len().to_string(),
    ]);

    let mut table = builder.build();
    if markdown {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    table.to_string()
}

fn push_counts(builder: &mut Builder, label: &str, counts: &[StatusCount]) {
    for count in counts {
        builder.push_record([
            format!("{} ({})", label, count.status),
            count.count.to_string(),
        ]);
    }
}
