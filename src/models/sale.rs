use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for quoting or confirming a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleInput {
    pub sheep_id: String,
    /// Estimated live weight in kg.
    pub weight_kg: f64,
    /// Defaults to the calculator's standard rate when omitted.
    #[serde(default)]
    pub price_per_kg: Option<f64>,
}

/// A computed sale value that has not been confirmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleQuote {
    pub sheep_id: String,
    pub tag: String,
    pub weight_kg: f64,
    pub price_per_kg: f64,
    /// Unrounded weight × price.
    pub value: f64,
    /// `value` rounded to two decimals, for display.
    pub value_display: String,
}

/// Record of a confirmed sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub sheep_id: String,
    pub tag: String,
    pub breed: String,
    pub weight_kg: f64,
    pub price_per_kg: f64,
    pub total: f64,
    pub total_display: String,
    /// Confirmation message shown once the sale goes through.
    pub notice: String,
    pub issued_at: DateTime<Utc>,
}

/// A confirmed sale together with its printable invoice block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleConfirmation {
    pub invoice: Invoice,
    pub printable: String,
}
