use serde::Serialize;

use crate::cart::CartLineItem;

/// VAT applied on top of the cart subtotal.
pub const DEFAULT_TAX_RATE: f64 = 0.08;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub quantity: u32,
    pub line_total: f64,
}

/// Totals shown beside the checkout form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderSummary {
    pub fn from_items(items: &[CartLineItem], tax_rate: f64) -> Self {
        let lines: Vec<SummaryLine> = items
            .iter()
            .map(|item| SummaryLine {
                id: item.id,
                name: item.name.clone(),
                image_url: item.image_url.clone(),
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        let subtotal = lines
            .iter()
            .fold(0.0, |sum, line| sum + line.line_total);
        let tax = subtotal * tax_rate;
        Self {
            lines,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Label for the submit button.
    pub fn place_order_label(&self) -> String {
        format!("Place Order • {}", format_taka(self.total))
    }
}

/// Render an amount in taka with two decimals, e.g. `৳12.50`.
pub fn format_taka(amount: f64) -> String {
    format!("৳{:.2}", amount)
}
