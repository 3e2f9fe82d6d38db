//! Error types for the cesta-core library.

use thiserror::Error;

/// Main error type for the cesta library.
#[derive(Error, Debug)]
pub enum CestaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Category rule table error.
    #[error("rules error: {0}")]
    Rules(#[from] RulesError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while building or validating a category rule table.
#[derive(Error, Debug)]
pub enum RulesError {
    /// A priority rule pattern is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A rule or the fallback names a category that is not in the table.
    #[error("unknown category key: {0}")]
    UnknownCategory(String),

    /// Two categories share the same key.
    #[error("duplicate category key: {0}")]
    DuplicateCategory(String),

    /// The fallback category must not carry keywords.
    #[error("fallback category {0} must have an empty keyword list")]
    FallbackWithKeywords(String),
}

/// Result type for the cesta library.
pub type Result<T> = std::result::Result<T, CestaError>;
