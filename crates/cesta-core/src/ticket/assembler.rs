//! Turns candidate blocks into the deduplicated, date-ordered ticket list.

use std::collections::HashSet;

use tracing::{debug, info};

#[cfg(feature = "native")]
use rayon::prelude::*;

use super::rules::blocks::DEFAULT_DOCUMENT_MARKER;
use super::rules::{Block, BlockExtractor, BlockSplitter, HeaderExtractor, ItemLineParser, StoreResolver};
use crate::category::{CategoryClassifier, CategoryTable};
use crate::models::config::ParserConfig;
use crate::models::ticket::Ticket;

/// Result of parsing a merged text.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Accepted tickets, sorted by date.
    pub tickets: Vec<Ticket>,
    /// Number of candidate blocks.
    pub blocks: usize,
    /// Blocks without a valid header.
    pub rejected: usize,
    /// Valid blocks whose invoice id was already accepted.
    pub duplicates: usize,
}

/// Ticket assembler: runs header, store and item extraction per block.
#[derive(Debug, Clone)]
pub struct TicketAssembler {
    splitter: BlockSplitter,
    document_marker: String,
    header: HeaderExtractor,
    stores: StoreResolver,
    classifier: CategoryClassifier,
    parallel: bool,
}

impl TicketAssembler {
    /// Assembler with the built-in store directory and category table.
    pub fn new() -> Self {
        Self::with_classifier(CategoryClassifier::default())
    }

    pub fn with_classifier(classifier: CategoryClassifier) -> Self {
        Self {
            splitter: BlockSplitter::default(),
            document_marker: DEFAULT_DOCUMENT_MARKER.to_string(),
            header: HeaderExtractor::new(),
            stores: StoreResolver::default(),
            classifier,
            parallel: false,
        }
    }

    /// Assembler configured from the `parser` config section.
    pub fn from_config(config: &ParserConfig, table: CategoryTable) -> Self {
        Self::with_classifier(CategoryClassifier::new(table))
            .with_separator_min_len(config.separator_min_len)
            .with_document_marker(&config.document_marker)
            .with_store_resolver(
                StoreResolver::new(config.stores.clone())
                    .with_header_lines(config.store_header_lines),
            )
            .with_parallel(config.parallel)
    }

    /// Set the minimum separator run length.
    pub fn with_separator_min_len(mut self, min_len: usize) -> Self {
        self.splitter = BlockSplitter::new(min_len);
        self
    }

    /// Set the document marker glyph.
    pub fn with_document_marker(mut self, marker: &str) -> Self {
        self.document_marker = marker.to_string();
        self
    }

    /// Set the store directory.
    pub fn with_store_resolver(mut self, stores: StoreResolver) -> Self {
        self.stores = stores;
        self
    }

    /// Extract blocks on the rayon pool. Ignored without the `native` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    /// Build a ticket from one raw block, or `None` if it is not a ticket.
    pub fn parse_block(&self, raw: &str) -> Option<Ticket> {
        let block = Block::new(raw, &self.document_marker);
        if block.is_marker_only() {
            return None;
        }

        let header = self.header.extract(&block)?;
        let store = self.stores.resolve(block.lines());
        let items = ItemLineParser::new(&self.classifier).parse(block.lines());

        Some(Ticket {
            id: header.invoice_id,
            date: header.date,
            time: header.time,
            total: header.total,
            store,
            items,
        })
    }

    /// Tickets from blocks in source order, deduplicated and date-sorted.
    pub fn assemble(&self, blocks: &[&str]) -> Vec<Ticket> {
        self.assemble_blocks(blocks).tickets
    }

    /// Split `text` into blocks and assemble them.
    pub fn parse_text(&self, text: &str) -> ParseOutcome {
        let blocks = self.splitter.split(text);
        let outcome = self.assemble_blocks(&blocks);

        info!(
            "Parsed {} tickets from {} blocks ({} rejected, {} duplicates)",
            outcome.tickets.len(),
            outcome.blocks,
            outcome.rejected,
            outcome.duplicates
        );

        outcome
    }

    fn assemble_blocks(&self, blocks: &[&str]) -> ParseOutcome {
        let candidates = self.extract_all(blocks);

        let mut outcome = ParseOutcome {
            blocks: blocks.len(),
            ..Default::default()
        };
        let mut seen = HashSet::new();

        for (index, candidate) in candidates.into_iter().enumerate() {
            match candidate {
                None => {
                    debug!("Block {} rejected: no valid header", index);
                    outcome.rejected += 1;
                }
                Some(ticket) if !seen.insert(ticket.id.clone()) => {
                    debug!("Block {} rejected: duplicate ticket {}", index, ticket.id);
                    outcome.duplicates += 1;
                }
                Some(ticket) => {
                    debug!(
                        "Block {} accepted: ticket {} ({} items)",
                        index,
                        ticket.id,
                        ticket.items.len()
                    );
                    outcome.tickets.push(ticket);
                }
            }
        }

        // Stable: equal dates keep source order.
        outcome.tickets.sort_by_key(|ticket| ticket.date);
        outcome
    }

    /// Per-block extraction results, in source order.
    fn extract_all(&self, blocks: &[&str]) -> Vec<Option<Ticket>> {
        #[cfg(feature = "native")]
        if self.parallel {
            return blocks.par_iter().map(|raw| self.parse_block(raw)).collect();
        }

        blocks.iter().map(|raw| self.parse_block(raw)).collect()
    }
}

impl Default for TicketAssembler {
    fn default() -> Self {
        Self::new()
    }
}
