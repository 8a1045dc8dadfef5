use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pricing::effective_price;
use crate::domain::Product;

/// One product in the cart. Display fields are copied from the product when
/// the line is created and do not follow later catalog edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: Decimal,
    #[serde(default)]
    pub promotion: u8,
    pub quantity: u32,
}

impl CartLine {
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
            promotion: product.promotion,
            quantity: 1,
        }
    }

    pub fn effective_price(&self) -> Decimal {
        effective_price(self.price, self.promotion)
    }

    /// Full-precision `effective_price * quantity`. Saturates at
    /// `Decimal::MAX`; carts never hold such a line.
    pub fn line_total(&self) -> Decimal {
        self.effective_price().saturating_mul(Decimal::from(self.quantity))
    }

    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.effective_price().checked_mul(Decimal::from(self.quantity))
    }
}
