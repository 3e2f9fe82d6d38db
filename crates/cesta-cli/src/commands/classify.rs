//! Classify command - print the category of product names.

use clap::Args;

use cesta_core::CategoryClassifier;

use super::{load_config, load_table};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Product names as printed on tickets
    #[arg(required = true)]
    names: Vec<String>,
}

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let classifier = CategoryClassifier::new(load_table(&config)?);

    for name in &args.names {
        println!("{}\t{}", classifier.classify(name), name);
    }

    Ok(())
}
