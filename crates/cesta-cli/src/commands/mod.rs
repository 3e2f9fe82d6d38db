//! Subcommands of the `cesta` binary.

pub mod classify;
pub mod config;
pub mod merge;
pub mod parse;
pub mod prices;
pub mod rules;

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;

use cesta_core::models::config::CestaConfig;
use cesta_core::CategoryTable;

/// `<config dir>/cesta/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cesta")
        .join("config.json")
}

/// The `--config` path if given, otherwise the default location.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration. An explicit path must exist; the default one
/// falls back to built-in defaults when absent.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<CestaConfig> {
    let path = config_path(explicit);

    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        return Ok(CestaConfig::from_file(&path)?);
    }
    if explicit.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    Ok(CestaConfig::default())
}

/// Category table from `parser.rules_path`, or the built-in one.
pub fn load_table(config: &CestaConfig) -> anyhow::Result<CategoryTable> {
    match &config.parser.rules_path {
        Some(path) => {
            debug!("Loading category rules from {}", path.display());
            Ok(CategoryTable::from_file(path)?)
        }
        None => Ok(CategoryTable::builtin()),
    }
}

/// Write to `output` if given, otherwise print to stdout.
pub fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
            eprintln!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", content),
    }
    Ok(())
}
