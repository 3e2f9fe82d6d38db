//! Amount parsing for comma-decimal receipts.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a comma-decimal amount (e.g., "12,50" or "0,620").
///
/// The decimal comma is replaced by a point before parsing; anything that
/// is still not a plain decimal afterwards ("1,234,56", "") is rejected.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Round a currency amount to cents.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Format an amount the way receipts print it (1234,50 €).
pub fn format_eur(amount: Decimal) -> String {
    format!("{:.2} €", round_currency(amount)).replace('.', ",")
}
