//! Concatenation of per-document texts into one labelled stream.

use std::fmt::Display;

use tracing::{debug, warn};

use super::PageTextSource;
use crate::models::config::MergeConfig;
use crate::ticket::rules::blocks::DEFAULT_DOCUMENT_MARKER;

/// Layout of the merged text.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Number of `=` characters in each separator rule.
    pub separator_width: usize,
    /// Glyph placed before each document name.
    pub document_marker: String,
    /// Start of the placeholder written for unreadable documents.
    pub error_placeholder_prefix: String,
}

impl MergeOptions {
    pub fn from_config(config: &MergeConfig, document_marker: &str) -> Self {
        Self {
            separator_width: config.separator_width,
            document_marker: document_marker.to_string(),
            error_placeholder_prefix: config.error_placeholder_prefix.clone(),
        }
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::from_config(&MergeConfig::default(), DEFAULT_DOCUMENT_MARKER)
    }
}

/// Merged text and per-document counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub text: String,
    /// Documents whose text was extracted.
    pub processed: usize,
    /// Documents replaced by the error placeholder.
    pub errors: usize,
}

/// Incremental merger, one document at a time.
#[derive(Debug, Clone)]
pub struct DocumentMerger {
    options: MergeOptions,
    sections: Vec<String>,
    processed: usize,
    errors: usize,
}

impl DocumentMerger {
    pub fn new(options: MergeOptions) -> Self {
        Self {
            options,
            sections: Vec::new(),
            processed: 0,
            errors: 0,
        }
    }

    /// Append a document. Extraction failures are written as a placeholder
    /// and reported through the return value.
    pub fn add<S: PageTextSource + ?Sized>(&mut self, name: &str, source: &S) -> bool {
        match source.page_texts() {
            Ok(pages) => {
                debug!("{}: {} pages with text", name, pages.len());
                self.processed += 1;
                self.push_section(name, &pages.join("\n"));
                true
            }
            Err(e) => {
                self.add_failure(name, e);
                false
            }
        }
    }

    /// Append the error placeholder for a document that could not be read.
    pub fn add_failure(&mut self, name: &str, reason: impl Display) {
        warn!("{}: {}", name, reason);
        self.errors += 1;
        let placeholder = format!("{}: {}]", self.options.error_placeholder_prefix, reason);
        self.push_section(name, &placeholder);
    }

    pub fn finish(self) -> MergeOutcome {
        MergeOutcome {
            text: self.sections.join("\n"),
            processed: self.processed,
            errors: self.errors,
        }
    }

    fn push_section(&mut self, name: &str, text: &str) {
        let rule = "=".repeat(self.options.separator_width);
        self.sections.push(format!(
            "\n{rule}\n{} {}\n{rule}\n{}",
            self.options.document_marker, name, text
        ));
    }
}

/// Merge named documents in the given order.
pub fn merge_documents<'a, S>(
    documents: impl IntoIterator<Item = (&'a str, &'a S)>,
    options: MergeOptions,
) -> MergeOutcome
where
    S: PageTextSource + ?Sized + 'a,
{
    let mut merger = DocumentMerger::new(options);
    for (name, source) in documents {
        merger.add(name, source);
    }
    merger.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::pdf::Result;
    use pretty_assertions::assert_eq;

    struct Unreadable;

    impl PageTextSource for Unreadable {
        fn page_texts(&self) -> Result<Vec<String>> {
            Err(PdfError::Encrypted)
        }
    }

    #[test]
    fn test_merge_layout() {
        let options = MergeOptions {
            separator_width: 5,
            ..Default::default()
        };
        let first = vec!["page one".to_string(), "page two".to_string()];
        let second = vec!["only page".to_string()];

        let outcome = merge_documents([("a.pdf", &first), ("b.pdf", &second)], options);

        assert_eq!(
            outcome.text,
            "\n=====\n📄 a.pdf\n=====\npage one\npage two\n\n=====\n📄 b.pdf\n=====\nonly page"
        );
        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.errors, 0);
    }

    #[test]
    fn test_failure_is_a_placeholder() {
        let mut merger = DocumentMerger::new(MergeOptions::default());
        assert!(merger.add("good.pdf", "text"));
        assert!(!merger.add("bad.pdf", &Unreadable));
        merger.add_failure("gone.pdf", "file vanished");

        let outcome = merger.finish();
        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.errors, 2);
        assert!(outcome.text.contains("📄 bad.pdf"));
        assert!(outcome.text.contains("[Error leyendo PDF: PDF is encrypted]"));
        assert!(outcome.text.contains("[Error leyendo PDF: file vanished]"));
    }

    #[test]
    fn test_default_separator_splits_blocks() {
        use crate::ticket::rules::BlockSplitter;

        let outcome = merge_documents([("a.pdf", "ticket text")], MergeOptions::default());
        let blocks = BlockSplitter::default().split(&outcome.text);
        assert_eq!(blocks, vec!["📄 a.pdf", "ticket text"]);
    }
}
