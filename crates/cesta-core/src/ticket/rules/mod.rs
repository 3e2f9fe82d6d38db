//! Rule-based extractors for supermarket tickets.

pub mod amounts;
pub mod blocks;
pub mod header;
pub mod items;
pub mod patterns;
pub mod stores;

pub use amounts::{format_eur, parse_amount, round_currency};
pub use blocks::{Block, BlockSplitter};
pub use header::{HeaderExtractor, TicketHeader};
pub use items::{ItemLine, ItemLineParser, ItemReader, ItemState};
pub use stores::{StoreMarker, StoreResolver};

/// Trait for extractors that read one field group out of a block.
pub trait BlockExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract from the block, or `None` when the block lacks the field.
    fn extract(&self, block: &Block<'_>) -> Option<Self::Output>;
}
