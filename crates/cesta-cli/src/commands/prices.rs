//! Prices command - report product price changes from a ticket document.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use rust_decimal::Decimal;

use cesta_core::models::ticket::TicketsData;
use cesta_core::ticket::rules::format_eur;
use cesta_core::{price_alerts, price_changes, PriceChange};

use super::load_config;

/// Arguments for the prices command.
#[derive(Args)]
pub struct PricesArgs {
    /// Ticket document written by `cesta parse`
    #[arg(required = true)]
    input: PathBuf,

    /// Only show changes above the alert threshold
    #[arg(long)]
    alerts: bool,

    /// Alert threshold in percent (default from config)
    #[arg(long)]
    threshold: Option<f64>,

    /// Maximum number of rows (default from config for alerts)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub async fn run(args: PricesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    let document: TicketsData = serde_json::from_str(&fs::read_to_string(&args.input)?)?;

    let changes = price_changes(&document.product_history);
    let rows = if args.alerts {
        price_alerts(
            &changes,
            args.threshold
                .unwrap_or(config.report.price_alert_threshold_percent),
            args.limit.unwrap_or(config.report.top_alerts),
        )
    } else {
        let mut changes = changes;
        if let Some(limit) = args.limit {
            changes.truncate(limit);
        }
        changes
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{} No price changes found.", style("ℹ").blue());
        return Ok(());
    }

    for change in &rows {
        println!("{}", format_row(change));
    }

    Ok(())
}

fn format_row(change: &PriceChange) -> String {
    let percent = format!("{:+.1}%", change.change_percent);
    let percent = if change.change_percent > Decimal::ZERO {
        style(percent).red()
    } else {
        style(percent).green()
    };

    format!(
        "{:<36} {:>10} -> {:<10} {:>8}  ({} .. {})",
        change.product,
        format_eur(change.first_price),
        format_eur(change.last_price),
        percent,
        change.first_date,
        change.last_date
    )
}
