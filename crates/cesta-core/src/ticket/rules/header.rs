//! Ticket header extraction: date, time, invoice id and total.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use super::amounts::parse_amount;
use super::blocks::Block;
use super::patterns::{DATE_TIME, INVOICE_ID, TOTAL_AMOUNT};
use super::BlockExtractor;

/// Required header fields of a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketHeader {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub invoice_id: String,
    pub total: Decimal,
}

/// Header field extractor.
///
/// All three fields must be present and well-formed, otherwise the block
/// is not a ticket.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderExtractor;

impl HeaderExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Find the first `DD/MM/YYYY HH:MM` pair.
    pub fn extract_date_time(&self, text: &str) -> Option<(NaiveDate, NaiveTime)> {
        let caps = DATE_TIME.captures(text)?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        let hour: u32 = caps[4].parse().ok()?;
        let minute: u32 = caps[5].parse().ok()?;

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some((date, time))
    }

    pub fn extract_invoice_id(&self, text: &str) -> Option<String> {
        INVOICE_ID.captures(text).map(|caps| caps[1].to_string())
    }

    pub fn extract_total(&self, text: &str) -> Option<Decimal> {
        TOTAL_AMOUNT
            .captures(text)
            .and_then(|caps| parse_amount(&caps[1]))
    }
}

impl BlockExtractor for HeaderExtractor {
    type Output = TicketHeader;

    fn extract(&self, block: &Block<'_>) -> Option<Self::Output> {
        let text = block.text();
        let (date, time) = self.extract_date_time(text)?;
        let invoice_id = self.extract_invoice_id(text)?;
        let total = self.extract_total(text)?;

        Some(TicketHeader {
            date,
            time,
            invoice_id,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const HEADER: &str = "MERCADONA, S.A. A-46103834\n\
        C/ GUADARRAMA 2\n\
        28260 GALAPAGAR\n\
        05/03/2024 19:07 OP: 123456\n\
        FACTURA SIMPLIFICADA: 2236-011-123456\n\
        TOTAL (€) 45,30";

    fn extract(text: &str) -> Option<TicketHeader> {
        HeaderExtractor::new().extract(&Block::new(text, "📄"))
    }

    #[test]
    fn test_extract_header() {
        let header = extract(HEADER).unwrap();
        assert_eq!(header.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(header.time, NaiveTime::from_hms_opt(19, 7, 0).unwrap());
        assert_eq!(header.invoice_id, "2236-011-123456");
        assert_eq!(header.total, Decimal::from_str("45.30").unwrap());
    }

    #[test]
    fn test_missing_any_field_rejects_block() {
        let without_date = HEADER.replace("05/03/2024 19:07", "");
        let without_id = HEADER.replace("FACTURA SIMPLIFICADA: 2236-011-123456", "");
        let without_total = HEADER.replace("TOTAL (€) 45,30", "");

        assert!(extract(&without_date).is_none());
        assert!(extract(&without_id).is_none());
        assert!(extract(&without_total).is_none());
    }

    #[test]
    fn test_invalid_calendar_date_rejects_block() {
        assert!(extract(&HEADER.replace("05/03/2024", "31/02/2024")).is_none());
        assert!(extract(&HEADER.replace("19:07", "25:61")).is_none());
    }

    #[test]
    fn test_unparseable_total_rejects_block() {
        assert!(extract(&HEADER.replace("45,30", "1,234,50")).is_none());
    }

    #[test]
    fn test_fields_are_searched_in_whole_block() {
        let reordered = "TOTAL (€) 3,10\nsome text\nFACTURA SIMPLIFICADA: 1-2-3\n01/01/2024 09:00";
        let header = extract(reordered).unwrap();
        assert_eq!(header.invoice_id, "1-2-3");
        assert_eq!(header.total, Decimal::from_str("3.10").unwrap());
    }
}
