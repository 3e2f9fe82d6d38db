//! Rules command - export and check category tables.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use cesta_core::CategoryTable;

use super::write_output;

/// Arguments for the rules command.
#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(Subcommand)]
enum RulesCommand {
    /// Write the built-in category table as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a category table file
    Check {
        /// Table file in the exported JSON format
        file: PathBuf,
    },
}

pub async fn run(args: RulesArgs) -> anyhow::Result<()> {
    match args.command {
        RulesCommand::Export { output } => {
            let json = serde_json::to_string_pretty(&CategoryTable::builtin().to_spec())?;
            write_output(output.as_deref(), &json)
        }
        RulesCommand::Check { file } => {
            let table = CategoryTable::from_file(&file)
                .map_err(|e| anyhow::anyhow!("Invalid rules file {}: {}", file.display(), e))?;

            println!(
                "{} {} categories, {} priority rules, fallback '{}'",
                style("✓").green(),
                table.categories().len(),
                table.priority_rules().len(),
                table.fallback()
            );
            Ok(())
        }
    }
}
