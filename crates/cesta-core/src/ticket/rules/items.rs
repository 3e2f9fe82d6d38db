//! Line item extraction.
//!
//! Items are read by a small state machine over the block lines. The
//! column header row opens the item list, the total line closes it, and in
//! between every line is either a regular item, a weight continuation that
//! completes the previous item, or noise.

use rust_decimal::Decimal;
use tracing::trace;

use super::amounts::{parse_amount, round_currency};
use super::patterns::{
    FOOTER_LITERAL, ITEMS_AMOUNT_LABEL, ITEMS_DESCRIPTION_LABEL, ITEM_LINE, TOTAL_LINE_PREFIX,
    WEIGHT_LINE, WHITESPACE_RUN,
};
use crate::category::CategoryClassifier;
use crate::models::ticket::Item;

/// Position of the reader within a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    /// Before the column header row.
    SeekingHeaderRow,
    /// Between the column header row and the total line.
    ReadingItems,
    /// The total line was seen; remaining lines are ignored.
    Finished,
}

/// A `<weight> kg <price> €/kg <price>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightLine {
    pub weight: Decimal,
    pub price_per_kg: Decimal,
    pub price: Decimal,
}

/// A line matching the item grammar, before footer filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCandidate {
    pub quantity: u32,
    pub name: String,
    pub unit_price: Decimal,
    pub price: Decimal,
}

impl ItemCandidate {
    /// False for receipt footer lines (payment, taxes, fees) that happen to
    /// fit the item grammar.
    pub fn is_product(&self) -> bool {
        !self.name.is_empty() && !FOOTER_LITERAL.is_match(&self.name)
    }
}

/// What a single line means while reading items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemLine {
    /// Starts with the total label.
    Terminator,
    /// Weight continuation of the previous item.
    Continuation(WeightLine),
    /// Regular item line.
    Item(ItemCandidate),
    /// Anything else.
    Unrecognized,
}

impl ItemLine {
    /// Classify a trimmed line. The weight grammar is tried before the
    /// item grammar; a line whose numbers do not parse is `Unrecognized`.
    pub fn parse(line: &str) -> Self {
        if line.starts_with(TOTAL_LINE_PREFIX) {
            return Self::Terminator;
        }
        if let Some(weight) = parse_weight_line(line) {
            return Self::Continuation(weight);
        }
        if let Some(candidate) = parse_item_line(line) {
            return Self::Item(candidate);
        }
        Self::Unrecognized
    }
}

fn parse_weight_line(line: &str) -> Option<WeightLine> {
    let caps = WEIGHT_LINE.captures(line)?;
    Some(WeightLine {
        weight: parse_amount(&caps[1])?,
        price_per_kg: parse_amount(&caps[2])?,
        price: parse_amount(&caps[3])?,
    })
}

fn parse_item_line(line: &str) -> Option<ItemCandidate> {
    let caps = ITEM_LINE.captures(line)?;
    let quantity: u32 = caps[1].parse().ok()?;
    let name = WHITESPACE_RUN.replace_all(&caps[2], " ").trim().to_string();
    let first = parse_amount(&caps[3])?;

    let (unit_price, price) = match caps.get(4) {
        Some(second) => (first, parse_amount(second.as_str())?),
        None if quantity > 0 => (first / Decimal::from(quantity), first),
        None => (first, first),
    };

    Some(ItemCandidate {
        quantity,
        name,
        unit_price: round_currency(unit_price),
        price: round_currency(price),
    })
}

fn is_header_row(line: &str) -> bool {
    line.contains(ITEMS_DESCRIPTION_LABEL) && line.contains(ITEMS_AMOUNT_LABEL)
}

/// Item-reading state machine for one block.
pub struct ItemReader<'c> {
    classifier: &'c CategoryClassifier,
    state: ItemState,
    items: Vec<Item>,
}

impl<'c> ItemReader<'c> {
    pub fn new(classifier: &'c CategoryClassifier) -> Self {
        Self {
            classifier,
            state: ItemState::SeekingHeaderRow,
            items: Vec::new(),
        }
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Advance over one raw line.
    pub fn feed(&mut self, line: &str) {
        let line = line.trim();

        match self.state {
            ItemState::SeekingHeaderRow => {
                if is_header_row(line) {
                    self.state = ItemState::ReadingItems;
                }
            }
            ItemState::ReadingItems => match ItemLine::parse(line) {
                ItemLine::Terminator => self.state = ItemState::Finished,
                ItemLine::Continuation(weight) => {
                    if !self.complete_last(&weight) {
                        trace!("Weight line without a preceding item ignored: {}", line);
                    }
                }
                ItemLine::Item(candidate) => self.accept(candidate),
                ItemLine::Unrecognized => {}
            },
            ItemState::Finished => {}
        }
    }

    /// Items read so far, in line order.
    pub fn finish(self) -> Vec<Item> {
        self.items
    }

    /// Apply a weight continuation to the last item of this block.
    /// Returns false when there is no item to complete.
    fn complete_last(&mut self, weight: &WeightLine) -> bool {
        match self.items.last_mut() {
            Some(item) => {
                item.apply_weight(weight.weight, weight.price);
                true
            }
            None => false,
        }
    }

    fn accept(&mut self, candidate: ItemCandidate) {
        if !candidate.is_product() {
            trace!("Skipping non-product line: {}", candidate.name);
            return;
        }

        let category = self.classifier.classify(&candidate.name).to_string();
        trace!("Item {} -> {}", candidate.name, category);
        self.items.push(Item::new(
            candidate.name,
            candidate.quantity,
            candidate.unit_price,
            candidate.price,
            category,
        ));
    }
}

/// Extracts the ordered item list of a block.
pub struct ItemLineParser<'c> {
    classifier: &'c CategoryClassifier,
}

impl<'c> ItemLineParser<'c> {
    pub fn new(classifier: &'c CategoryClassifier) -> Self {
        Self { classifier }
    }

    pub fn parse(&self, lines: &[&str]) -> Vec<Item> {
        let mut reader = ItemReader::new(self.classifier);
        for line in lines {
            reader.feed(line);
            if reader.state() == ItemState::Finished {
                break;
            }
        }
        reader.finish()
    }
}
