//! Core library for supermarket ticket processing.
//!
//! This crate provides:
//! - PDF text extraction and merging into a single labelled text stream
//! - Ticket reconstruction (header, store, line items) from merged text
//! - Product categorisation with priority rules and keyword tables
//! - The output document, price history and spending reports

pub mod category;
pub mod document;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;
pub mod ticket;

pub use category::{CategoryClassifier, CategoryTable};
pub use document::{build_document, PARSER_VERSION};
pub use error::{CestaError, PdfError, Result, RulesError};
pub use models::config::CestaConfig;
pub use models::ticket::{Item, PriceEntry, ProductHistory, StoreDescriptor, Ticket, TicketsData};
#[cfg(feature = "native")]
pub use pdf::PdfExtractor;
pub use pdf::{merge_documents, DocumentMerger, MergeOptions, MergeOutcome, PageTextSource};
pub use report::{price_alerts, price_changes, PriceChange, Summary};
pub use ticket::{ParseOutcome, ProductHistoryBuilder, TicketAssembler};
