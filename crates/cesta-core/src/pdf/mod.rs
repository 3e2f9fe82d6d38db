//! Document text extraction and merging.

#[cfg(feature = "native")]
mod extractor;
mod merge;

#[cfg(feature = "native")]
pub use extractor::PdfExtractor;
pub use merge::{merge_documents, DocumentMerger, MergeOptions, MergeOutcome};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Anything that can produce the text of its pages.
pub trait PageTextSource {
    /// Text of every page with content, in page order.
    fn page_texts(&self) -> Result<Vec<String>>;
}

/// Already extracted page texts.
impl PageTextSource for Vec<String> {
    fn page_texts(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

/// Plain text treated as a single page.
impl PageTextSource for str {
    fn page_texts(&self) -> Result<Vec<String>> {
        Ok(vec![self.to_string()])
    }
}
