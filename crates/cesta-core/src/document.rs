//! Assembly of the serialized output document.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::category::CategoryTable;
use crate::models::ticket::{CategoryInfo, Meta, Ticket, TicketsData};
use crate::ticket::ProductHistoryBuilder;

/// Version written to `meta.parserVersion`.
pub const PARSER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default currency code.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Build the output document from date-sorted tickets.
pub fn build_document(
    tickets: Vec<Ticket>,
    table: &CategoryTable,
    last_updated: NaiveDate,
    currency: &str,
) -> TicketsData {
    let categories: IndexMap<String, CategoryInfo> = table
        .categories()
        .iter()
        .map(|category| {
            (
                category.key.clone(),
                CategoryInfo {
                    name: category.name.clone(),
                    icon: category.icon.clone(),
                    color: category.color.clone(),
                },
            )
        })
        .collect();

    let product_history = ProductHistoryBuilder::new().build(&tickets);

    TicketsData {
        meta: Meta {
            last_updated,
            total_tickets: tickets.len(),
            currency: currency.to_string(),
            parser_version: PARSER_VERSION.to_string(),
        },
        categories,
        tickets,
        product_history,
    }
}
