//! Merge command - concatenate the text of every PDF in a directory.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cesta_core::pdf::{DocumentMerger, MergeOptions, PdfExtractor};

use super::{load_config, write_output};

/// Arguments for the merge command.
#[derive(Args)]
pub struct MergeArgs {
    /// Directory containing ticket PDFs
    #[arg(required = true)]
    dir: PathBuf,

    /// Output text file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: MergeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.dir.is_dir() {
        anyhow::bail!("Directory not found: {}", args.dir.display());
    }

    let pattern = args.dir.join("*.pdf");
    let mut files: Vec<PathBuf> = glob(&pattern.to_string_lossy())?
        .filter_map(|r| r.ok())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No PDF files found in {}", args.dir.display());
    }

    info!("Merging {} PDFs from {}", files.len(), args.dir.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let options = MergeOptions::from_config(&config.merge, &config.parser.document_marker);
    let mut merger = DocumentMerger::new(options);
    let mut failed = Vec::new();

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name.clone());

        let ok = match PdfExtractor::from_file(path) {
            Ok(extractor) => merger.add(&name, &extractor),
            Err(e) => {
                merger.add_failure(&name, e);
                false
            }
        };
        if !ok {
            failed.push(name);
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let outcome = merger.finish();
    write_output(args.output.as_deref(), &outcome.text)?;

    eprintln!(
        "{} Merged {} PDFs in {:?}",
        style("✓").green(),
        files.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} processed, {} failed",
        style(outcome.processed).green(),
        style(outcome.errors).red()
    );
    for name in &failed {
        eprintln!("  - {}", name);
    }

    debug!("Merged text is {} bytes", outcome.text.len());

    Ok(())
}
