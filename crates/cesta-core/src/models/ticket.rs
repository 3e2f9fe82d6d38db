//! Receipt data models and the serialized output document.

use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ticket::rules::round_currency;

/// Store a ticket was issued at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDescriptor {
    /// Display name.
    pub name: String,
    /// City, empty when the store could not be located.
    pub city: String,
}

impl StoreDescriptor {
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
        }
    }
}

/// A single purchased line on a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Product name, whitespace-collapsed.
    pub name: String,

    /// Line total.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units bought. Not meaningful for weighed products.
    pub quantity: u32,

    /// Price of one unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Category key.
    pub category: String,

    /// Weight in kilograms, only for weighed products.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub weight: Option<Decimal>,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        price: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            unit_price,
            category: category.into(),
            weight: None,
        }
    }

    /// Record the weight and final price printed on a continuation line.
    /// The weight keeps its printed precision; the price is rounded to cents.
    pub fn apply_weight(&mut self, weight: Decimal, price: Decimal) {
        self.weight = Some(weight);
        self.price = round_currency(price);
    }

    pub fn is_weighed(&self) -> bool {
        self.weight.is_some()
    }
}

/// One reconstructed receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Invoice number, unique across a run.
    pub id: String,

    /// Purchase date.
    pub date: NaiveDate,

    /// Purchase time of day.
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,

    /// Total as printed on the receipt.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Store the ticket was issued at.
    pub store: StoreDescriptor,

    /// Line items in receipt order.
    pub items: Vec<Item>,
}

impl Ticket {
    /// Sum of the item line totals.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|i| i.price).sum()
    }

    /// Check the ticket for inconsistencies and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.items.is_empty() {
            issues.push(format!("Ticket {} has no items", self.id));
        }

        if self.total <= Decimal::ZERO {
            issues.push(format!("Ticket {} has a non-positive total", self.id));
        }

        let items_total = self.items_total();
        if !self.items.is_empty() && (items_total - self.total).abs() > Decimal::new(1, 2) {
            issues.push(format!(
                "Ticket {}: item total ({}) differs from printed total ({})",
                self.id, items_total, self.total
            ));
        }

        issues
    }
}

/// One occurrence of a product in the price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub date: NaiveDate,

    /// Unit price paid.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// City of the store.
    pub store: String,
}

/// Product name to its chronological price entries, in first-seen order.
pub type ProductHistory = IndexMap<String, Vec<PriceEntry>>;

/// Display attributes of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub last_updated: NaiveDate,
    pub total_tickets: usize,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub parser_version: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

/// The complete output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketsData {
    pub meta: Meta,
    pub categories: IndexMap<String, CategoryInfo>,
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub product_history: ProductHistory,
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
