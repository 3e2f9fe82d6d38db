//! Per-product price history.

use crate::models::ticket::{PriceEntry, ProductHistory, Ticket};

/// Derives the price series of every product from assembled tickets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductHistoryBuilder;

impl ProductHistoryBuilder {
    pub fn new() -> Self {
        Self
    }

    /// One entry per item occurrence, in ticket then item order.
    ///
    /// Expects `tickets` already sorted by date, so every series comes out
    /// chronological. Products appear in first-seen order.
    pub fn build(&self, tickets: &[Ticket]) -> ProductHistory {
        let mut history = ProductHistory::new();

        for ticket in tickets {
            for item in &ticket.items {
                history
                    .entry(item.name.clone())
                    .or_default()
                    .push(PriceEntry {
                        date: ticket.date,
                        price: item.unit_price,
                        store: ticket.store.city.clone(),
                    });
            }
        }

        history
    }
}
