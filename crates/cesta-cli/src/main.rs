//! CLI application for supermarket ticket parsing and price tracking.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{classify, config, merge, parse, prices, rules};

/// Cesta - Turn supermarket ticket PDFs into structured purchase data
#[derive(Parser)]
#[command(name = "cesta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Concatenate the text of a directory of ticket PDFs
    Merge(merge::MergeArgs),

    /// Parse merged ticket text into the ticket document
    Parse(parse::ParseArgs),

    /// Report price changes from a ticket document
    Prices(prices::PricesArgs),

    /// Export or check category tables
    Rules(rules::RulesArgs),

    /// Print the category of product names
    Classify(classify::ClassifyArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Merge(args) => merge::run(args, cli.config.as_deref()).await,
        Commands::Parse(args) => parse::run(args, cli.config.as_deref()).await,
        Commands::Prices(args) => prices::run(args, cli.config.as_deref()).await,
        Commands::Rules(args) => rules::run(args).await,
        Commands::Classify(args) => classify::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
