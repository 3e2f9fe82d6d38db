//! Parse command - build the ticket document from merged text.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use tracing::{debug, info};

use cesta_core::models::ticket::{Ticket, TicketsData};
use cesta_core::ticket::rules::format_eur;
use cesta_core::{build_document, Summary, TicketAssembler};

use super::{load_config, load_table, write_output};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Merged ticket text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Date written as `meta.lastUpdated` (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Extract blocks in parallel
    #[arg(long)]
    parallel: bool,

    /// Report tickets whose items do not add up to the total
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Full JSON document
    Json,
    /// One row per ticket
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.parallel {
        config.parser.parallel = true;
    }
    let table = load_table(&config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let text = fs::read_to_string(&args.input)?;
    info!("Parsing {} ({} bytes)", args.input.display(), text.len());

    let assembler = TicketAssembler::from_config(&config.parser, table.clone());
    let outcome = assembler.parse_text(&text);

    if args.validate {
        let issues: Vec<String> = outcome.tickets.iter().flat_map(Ticket::validate).collect();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let last_updated = args.date.unwrap_or_else(|| Local::now().date_naive());
    let document = build_document(outcome.tickets, &table, last_updated, &config.output.currency);

    let summary = Summary::from_tickets(&document.tickets);
    info!(
        "{} tickets, {} items, {} spent",
        summary.tickets,
        summary.items,
        format_eur(summary.total_spent)
    );

    let output = match args.format {
        OutputFormat::Json if config.output.pretty => serde_json::to_string_pretty(&document)?,
        OutputFormat::Json => serde_json::to_string(&document)?,
        OutputFormat::Csv => format_csv(&document)?,
        OutputFormat::Text => format_text(&document),
    };

    write_output(args.output.as_deref(), &output)?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_csv(document: &TicketsData) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date", "store", "total", "items"])?;

    for ticket in &document.tickets {
        wtr.write_record([
            &ticket.date.to_string(),
            &ticket.store.city,
            &ticket.total.round_dp(2).to_string(),
            &ticket.items.len().to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(document: &TicketsData) -> String {
    let summary = Summary::from_tickets(&document.tickets);
    let mut output = String::new();

    output.push_str(&format!("Tickets: {}\n", summary.tickets));
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        output.push_str(&format!("Period:  {} - {}\n", first, last));
    }
    output.push_str(&format!("Spent:   {}\n", format_eur(summary.total_spent)));
    output.push_str(&format!("Average: {}\n", format_eur(summary.average_ticket)));
    output.push_str(&format!("Items:   {}\n", summary.items));

    if !summary.months.is_empty() {
        output.push_str("\nBy month:\n");
        for month in &summary.months {
            output.push_str(&format!("  {}  {:>12}\n", month.month, format_eur(month.spent)));
        }
    }

    if !summary.categories.is_empty() {
        output.push_str("\nBy category:\n");
        for share in &summary.categories {
            let label = document
                .categories
                .get(&share.key)
                .map(|info| format!("{} {}", info.icon, info.name))
                .unwrap_or_else(|| share.key.clone());
            output.push_str(&format!(
                "  {:<24} {:>4} items {:>12}\n",
                label,
                share.items,
                format_eur(share.spent)
            ));
        }
    }

    output
}
