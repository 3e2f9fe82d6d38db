//! Common regex patterns and literals of the receipt layout.

use lazy_static::lazy_static;
use regex::Regex;

/// Label of the column header row that opens the item list.
pub const ITEMS_DESCRIPTION_LABEL: &str = "Descripción";

/// Second label required on the column header row.
pub const ITEMS_AMOUNT_LABEL: &str = "Importe";

/// Prefix of the line carrying the ticket total; ends the item list.
pub const TOTAL_LINE_PREFIX: &str = "TOTAL (€)";

lazy_static! {
    // Candidate separator; the splitter filters runs by length
    pub static ref EQUALS_RUN: Regex = Regex::new(r"=+").unwrap();

    // Header fields
    pub static ref DATE_TIME: Regex = Regex::new(
        r"(\d{2})/(\d{2})/(\d{4})\s+(\d{2}):(\d{2})"
    ).unwrap();

    pub static ref INVOICE_ID: Regex = Regex::new(
        r"FACTURA SIMPLIFICADA:\s*(\S+)"
    ).unwrap();

    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"TOTAL \(€\)\s*([\d,]+)"
    ).unwrap();

    // Item lines: "0,620 kg 1,94 €/kg 1,20"
    pub static ref WEIGHT_LINE: Regex = Regex::new(
        r"^([\d,]+)\s*kg\s*([\d,]+)\s*€/kg\s*([\d,]+)"
    ).unwrap();

    // "1 PRODUCT NAME 1,25" or "2 PRODUCT NAME 1,25 2,50"
    pub static ref ITEM_LINE: Regex = Regex::new(
        r"^(\d+)\s+(.+?)\s+([\d,]+)(?:\s+([\d,]+))?$"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Footer lines that look like items: payment method, tax base, tax
    // amount, fee, delivery, parking. Matched anywhere in the name.
    pub static ref FOOTER_LITERAL: Regex = Regex::new(
        r"(?i)(TARJETA|BASE|IVA|CUOTA|ENTREGA|PARKING)"
    ).unwrap();
}
