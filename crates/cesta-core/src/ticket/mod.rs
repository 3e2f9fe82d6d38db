//! Ticket reconstruction from merged receipt text.

mod assembler;
mod history;
pub mod rules;

pub use assembler::{ParseOutcome, TicketAssembler};
pub use history::ProductHistoryBuilder;
