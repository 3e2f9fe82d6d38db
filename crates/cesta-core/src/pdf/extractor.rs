//! PDF text extraction using lopdf and pdf-extract.

use std::borrow::Cow;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::{PageTextSource, Result};
use crate::error::PdfError;

/// Text extractor over the raw bytes of one PDF.
pub struct PdfExtractor {
    data: Vec<u8>,
}

impl PdfExtractor {
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        Ok(Self::from_bytes(std::fs::read(path)?))
    }

    /// Number of pages, after decryption.
    pub fn page_count(&self) -> Result<usize> {
        let (doc, _) = self.load()?;
        Ok(doc.get_pages().len())
    }

    /// Parse the document, decrypting it with an empty password if needed.
    ///
    /// Returns the bytes pdf-extract should read: the decrypted copy for
    /// encrypted documents, the original bytes otherwise.
    fn load(&self) -> Result<(Document, Cow<'_, [u8]>)> {
        let mut doc = Document::load_mem(&self.data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            Cow::Owned(decrypted)
        } else {
            Cow::Borrowed(self.data.as_slice())
        };

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        Ok((doc, data))
    }
}

impl PageTextSource for PdfExtractor {
    fn page_texts(&self) -> Result<Vec<String>> {
        let (doc, data) = self.load()?;

        let pages = pdf_extract::extract_text_from_mem_by_pages(&data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let texts: Vec<String> = pages.into_iter().filter(|text| !text.trim().is_empty()).collect();
        if texts.is_empty() {
            warn!("PDF with {} pages has no extractable text", doc.get_pages().len());
        }
        debug!("Extracted text from {} of {} pages", texts.len(), doc.get_pages().len());

        Ok(texts)
    }
}
