//! Spending summary and price change reports.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::ticket::{ProductHistory, Ticket};
use crate::ticket::rules::round_currency;

/// Items and spend of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub key: String,
    pub items: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
}

/// Spend of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSpend {
    /// `YYYY-MM`.
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub spent: Decimal,
}

/// Aggregate figures over a set of tickets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub tickets: usize,
    pub items: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_ticket: Decimal,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Most items first, ties by key.
    pub categories: Vec<CategoryShare>,
    /// Ascending by month.
    pub months: Vec<MonthSpend>,
}

impl Summary {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let total_spent: Decimal = tickets.iter().map(|t| t.total).sum();
        let average_ticket = if tickets.is_empty() {
            Decimal::ZERO
        } else {
            round_currency(total_spent / Decimal::from(tickets.len()))
        };

        let mut per_category: HashMap<&str, (usize, Decimal)> = HashMap::new();
        let mut per_month: BTreeMap<String, Decimal> = BTreeMap::new();

        for ticket in tickets {
            *per_month
                .entry(ticket.date.format("%Y-%m").to_string())
                .or_default() += ticket.total;

            for item in &ticket.items {
                let entry = per_category.entry(item.category.as_str()).or_default();
                entry.0 += 1;
                entry.1 += item.price;
            }
        }

        let mut categories: Vec<CategoryShare> = per_category
            .into_iter()
            .map(|(key, (items, spent))| CategoryShare {
                key: key.to_string(),
                items,
                spent: round_currency(spent),
            })
            .collect();
        categories.sort_by(|a, b| b.items.cmp(&a.items).then_with(|| a.key.cmp(&b.key)));

        let months = per_month
            .into_iter()
            .map(|(month, spent)| MonthSpend {
                month,
                spent: round_currency(spent),
            })
            .collect();

        Self {
            tickets: tickets.len(),
            items: tickets.iter().map(|t| t.items.len()).sum(),
            total_spent: round_currency(total_spent),
            average_ticket,
            first_date: tickets.iter().map(|t| t.date).min(),
            last_date: tickets.iter().map(|t| t.date).max(),
            categories,
            months,
        }
    }
}

/// First and last recorded unit price of a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub product: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub first_price: Decimal,
    pub first_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub last_price: Decimal,
    pub last_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub change: Decimal,
    /// Percent over the first price, one decimal.
    #[serde(with = "rust_decimal::serde::float")]
    pub change_percent: Decimal,
    /// Number of history entries.
    pub purchases: usize,
}

/// Price changes of every product bought at least twice, largest absolute
/// change first.
pub fn price_changes(history: &ProductHistory) -> Vec<PriceChange> {
    let mut changes: Vec<PriceChange> = history
        .iter()
        .filter(|(_, entries)| entries.len() >= 2)
        .filter_map(|(product, entries)| {
            let mut sorted: Vec<_> = entries.iter().collect();
            sorted.sort_by_key(|entry| entry.date);

            let first = sorted.first()?;
            let last = sorted.last()?;
            if first.price.is_zero() {
                return None;
            }

            let change = last.price - first.price;
            Some(PriceChange {
                product: product.clone(),
                first_price: first.price,
                first_date: first.date,
                last_price: last.price,
                last_date: last.date,
                change,
                change_percent: (change / first.price * Decimal::ONE_HUNDRED).round_dp(1),
                purchases: entries.len(),
            })
        })
        .collect();

    changes.sort_by_key(|c| Reverse(c.change.abs()));
    changes
}

/// Changes whose absolute percent exceeds `threshold_percent`, largest
/// first, at most `limit`.
pub fn price_alerts(changes: &[PriceChange], threshold_percent: f64, limit: usize) -> Vec<PriceChange> {
    let mut alerts: Vec<PriceChange> = changes
        .iter()
        .filter(|c| c.change_percent.abs().to_f64().unwrap_or(0.0) > threshold_percent)
        .cloned()
        .collect();

    alerts.sort_by_key(|c| Reverse(c.change_percent.abs()));
    alerts.truncate(limit);
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ticket::{Item, PriceEntry, StoreDescriptor};
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn entry(month: u32, day: u32, cents: i64) -> PriceEntry {
        PriceEntry {
            date: date(month, day),
            price: Decimal::new(cents, 2),
            store: "GALAPAGAR".to_string(),
        }
    }

    fn ticket(month: u32, day: u32, total_cents: i64, items: &[(&str, &str, i64)]) -> Ticket {
        Ticket {
            id: format!("{month}-{day}"),
            date: date(month, day),
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            total: Decimal::new(total_cents, 2),
            store: StoreDescriptor::new("Mercadona", "GALAPAGAR"),
            items: items
                .iter()
                .map(|(name, category, cents)| {
                    let price = Decimal::new(*cents, 2);
                    Item::new(*name, 1, price, price, *category)
                })
                .collect(),
        }
    }

    #[test]
    fn test_summary() {
        let tickets = vec![
            ticket(1, 10, 1000, &[("LECHE", "lacteos", 400), ("AGUA", "bebidas", 600)]),
            ticket(1, 20, 500, &[("QUESO", "lacteos", 500)]),
            ticket(2, 3, 250, &[("PAN", "despensa", 250)]),
        ];

        let summary = Summary::from_tickets(&tickets);

        assert_eq!(summary.tickets, 3);
        assert_eq!(summary.items, 4);
        assert_eq!(summary.total_spent, Decimal::new(1750, 2));
        assert_eq!(summary.average_ticket, Decimal::new(583, 2));
        assert_eq!(summary.first_date, Some(date(1, 10)));
        assert_eq!(summary.last_date, Some(date(2, 3)));

        let keys: Vec<_> = summary.categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["lacteos", "bebidas", "despensa"]);
        assert_eq!(summary.categories[0].spent, Decimal::new(900, 2));

        assert_eq!(
            summary.months,
            vec![
                MonthSpend { month: "2024-01".to_string(), spent: Decimal::new(1500, 2) },
                MonthSpend { month: "2024-02".to_string(), spent: Decimal::new(250, 2) },
            ]
        );
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_tickets(&[]);
        assert_eq!(summary.tickets, 0);
        assert_eq!(summary.average_ticket, Decimal::ZERO);
        assert_eq!(summary.first_date, None);
    }

    #[test]
    fn test_price_changes() {
        let mut history = ProductHistory::new();
        history.insert("LECHE".into(), vec![entry(3, 1, 100), entry(1, 1, 90), entry(2, 1, 95)]);
        history.insert("PAN".into(), vec![entry(1, 1, 200), entry(2, 1, 150)]);
        history.insert("AGUA".into(), vec![entry(1, 1, 50)]);

        let changes = price_changes(&history);

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].product, "PAN");
        assert_eq!(changes[0].change, Decimal::new(-50, 2));
        assert_eq!(changes[0].change_percent, Decimal::new(-250, 1));

        assert_eq!(changes[1].product, "LECHE");
        assert_eq!(changes[1].first_date, date(1, 1));
        assert_eq!(changes[1].last_price, Decimal::new(100, 2));
        assert_eq!(changes[1].change_percent, Decimal::new(111, 1));
        assert_eq!(changes[1].purchases, 3);
    }

    #[test]
    fn test_zero_first_price_is_skipped() {
        let mut history = ProductHistory::new();
        history.insert("BOLSA".into(), vec![entry(1, 1, 0), entry(2, 1, 15)]);
        assert!(price_changes(&history).is_empty());
    }

    #[test]
    fn test_price_alerts() {
        let mut history = ProductHistory::new();
        history.insert("A".into(), vec![entry(1, 1, 100), entry(2, 1, 105)]);
        history.insert("B".into(), vec![entry(1, 1, 100), entry(2, 1, 80)]);
        history.insert("C".into(), vec![entry(1, 1, 1000), entry(2, 1, 1150)]);
        history.insert("D".into(), vec![entry(1, 1, 100), entry(2, 1, 110)]);

        let changes = price_changes(&history);
        let alerts = price_alerts(&changes, 10.0, 8);
        let names: Vec<_> = alerts.iter().map(|a| a.product.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);

        assert_eq!(price_alerts(&changes, 10.0, 1).len(), 1);
        assert_eq!(price_alerts(&changes, 1.0, 8).len(), 4);
    }
}
