//! Plain-text rendering for invoices and feed projections.

use crate::models::{FeedProjection, Invoice};
use crate::sale::format_amount;

/// Currency prefix used on invoices.
const CURRENCY: &str = "R";

/// Width of the longest bar in a projection chart.
const BAR_WIDTH: usize = 30;

const BAR: char = '█';

/// Render an invoice as a printable block.
///
/// Example output:
/// ```text
/// SALE INVOICE
/// Sheep Tag: A101
/// Breed:     Dorper
/// Weight:    45 kg
/// Rate:      R80.00 / kg
/// Total:     R3600.00
/// * Auto-generated invoice for your records.
/// ```
pub fn render_invoice(invoice: &Invoice) -> String {
    let mut output = String::new();
    output.push_str("SALE INVOICE\n");
    output.push_str(&format!("Sheep Tag: {}\n", invoice.tag));
    output.push_str(&format!("Breed:     {}\n", invoice.breed));
    output.push_str(&format!("Weight:    {} kg\n", invoice.weight_kg));
    output.push_str(&format!(
        "Rate:      {}{} / kg\n",
        CURRENCY,
        format_amount(invoice.price_per_kg)
    ));
    output.push_str(&format!("Total:     {}{}\n", CURRENCY, invoice.total_display));
    output.push_str("* Auto-generated invoice for your records.\n");
    output
}

/// Render a projection as a horizontal bar chart, one row per day.
///
/// Bars are scaled against the largest projected value.
pub fn render_projection(projection: &FeedProjection) -> String {
    let mut output = format!(
        "{} - Feed Stock Projection\n",
        projection.category.as_str()
    );

    let max = projection.values.iter().cloned().fold(0.0_f64, f64::max);

    for (label, value) in projection.labels.iter().zip(&projection.values) {
        let filled = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar: String = std::iter::repeat(BAR).take(filled).collect();
        output.push_str(&format!(
            "{:<6} |{:<width$}| {:.1} kg\n",
            label,
            bar,
            value,
            width = BAR_WIDTH
        ));
    }

    output
}
