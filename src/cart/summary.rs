use rust_decimal::Decimal;
use serde::Serialize;

use super::engine::Cart;
use super::pricing::format_price;

/// Read model handed to the rendering layer after every cart change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<LineSummary>,
    pub item_count: u32,
    pub total: Decimal,
    pub display_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSummary {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub effective_price: Decimal,
    pub promotion: u8,
    pub line_total: Decimal,
    pub display_line_total: String,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                let line_total = line.line_total();
                LineSummary {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    image: line.image.clone(),
                    quantity: line.quantity,
                    unit_price: line.price,
                    effective_price: line.effective_price(),
                    promotion: line.promotion,
                    line_total,
                    display_line_total: format_price(line_total),
                }
            })
            .collect();
        let total = cart.compute_total();
        Self {
            lines,
            item_count: cart.compute_item_count(),
            total,
            display_total: format_price(total),
        }
    }
}
