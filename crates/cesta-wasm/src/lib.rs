//! WASM bindings for supermarket ticket parsing.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Text extraction from PDFs happens on the JS side; these functions take
//! the merged text.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use cesta_core::document::DEFAULT_CURRENCY;
use cesta_core::ticket::rules::parse_amount as parse_ticket_amount;
use cesta_core::{build_document, price_changes, CategoryClassifier, CategoryTable, TicketAssembler, TicketsData};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    cesta_core::PARSER_VERSION.to_string()
}

/// Parse merged ticket text into the full ticket document.
#[wasm_bindgen]
pub fn parse_tickets(text: &str) -> Result<JsValue, JsValue> {
    TicketParser::new().parse(text)
}

/// Category key of a product name, using the built-in table.
#[wasm_bindgen]
pub fn classify_product(name: &str) -> String {
    CategoryClassifier::default().classify(name).to_string()
}

/// Parse a comma-decimal ticket amount (e.g., "12,50").
#[wasm_bindgen]
pub fn parse_amount(amount: &str) -> Option<f64> {
    parse_ticket_amount(amount).and_then(|d| d.to_string().parse().ok())
}

/// Price changes of a previously parsed document, largest first.
#[wasm_bindgen]
pub fn document_price_changes(document: JsValue) -> Result<JsValue, JsValue> {
    let document: TicketsData = serde_wasm_bindgen::from_value(document)?;
    to_js(&price_changes(&document.product_history))
}

/// Ticket parser class for browser use, optionally with a custom table.
#[wasm_bindgen]
pub struct TicketParser {
    table: CategoryTable,
}

#[wasm_bindgen]
impl TicketParser {
    /// Parser with the built-in category table.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            table: CategoryTable::builtin(),
        }
    }

    /// Parser with a category table in the exported JSON format.
    #[wasm_bindgen(js_name = withRules)]
    pub fn with_rules(rules_json: &str) -> Result<TicketParser, JsValue> {
        let table = CategoryTable::from_json(rules_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { table })
    }

    /// Parse merged text into the ticket document.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        let assembler = TicketAssembler::with_classifier(CategoryClassifier::new(self.table.clone()));
        let outcome = assembler.parse_text(text);
        let document = build_document(outcome.tickets, &self.table, today(), DEFAULT_CURRENCY);
        to_js(&document)
    }

    /// Category key of a product name.
    #[wasm_bindgen]
    pub fn classify(&self, name: &str) -> String {
        CategoryClassifier::new(self.table.clone()).classify(name).to_string()
    }
}

impl Default for TicketParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain JS objects rather than `Map`s, so the document reads like JSON.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}
