//! Configuration structures for the parsing pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ticket::rules::stores::StoreMarker;

/// Main configuration for cesta.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CestaConfig {
    /// Ticket parsing configuration.
    pub parser: ParserConfig,

    /// PDF merge configuration.
    pub merge: MergeConfig,

    /// Output document configuration.
    pub output: OutputConfig,

    /// Report configuration.
    pub report: ReportConfig,
}

/// Ticket parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Minimum run of `=` characters that separates blocks.
    pub separator_min_len: usize,

    /// Number of leading block lines searched for a store marker.
    pub store_header_lines: usize,

    /// Glyph that labels the source document of a block.
    pub document_marker: String,

    /// Extract blocks on a thread pool.
    pub parallel: bool,

    /// Known stores, highest priority first.
    pub stores: Vec<StoreMarker>,

    /// JSON file replacing the built-in category table.
    pub rules_path: Option<PathBuf>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            separator_min_len: 10,
            store_header_lines: 10,
            document_marker: "📄".to_string(),
            parallel: false,
            stores: StoreMarker::builtin(),
            rules_path: None,
        }
    }
}

/// PDF merge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Width of the `=` rules written around each document name.
    pub separator_width: usize,

    /// Prefix of the text substituted for unreadable documents.
    pub error_placeholder_prefix: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            separator_width: 60,
            error_placeholder_prefix: "[Error leyendo PDF".to_string(),
        }
    }
}

/// Output document configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Currency code written to the document metadata.
    pub currency: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            currency: "EUR".to_string(),
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Minimum absolute percent change reported as a price alert.
    pub price_alert_threshold_percent: f64,

    /// Maximum number of price alerts shown.
    pub top_alerts: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            price_alert_threshold_percent: 10.0,
            top_alerts: 8,
        }
    }
}

impl CestaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
