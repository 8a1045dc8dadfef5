use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::line::CartLine;
use crate::domain::Product;

/// Most units of one product a single line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),
    #[error("Quantity limit reached for {0}")]
    LimitReached(String),
}

/// Ordered cart lines, at most one per product id, every quantity in
/// `1..=MAX_LINE_QUANTITY`, and a total that fits in a `Decimal`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from stored lines. Empty lines are dropped, duplicates
    /// merge into the first occurrence, quantities are capped, and lines whose
    /// amounts cannot be computed are discarded.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for mut line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.position(&line.product_id) {
                Some(index) => {
                    let merged = cart.lines[index].quantity.saturating_add(line.quantity);
                    cart.try_set(index, merged.min(MAX_LINE_QUANTITY));
                }
                None => {
                    line.quantity = line.quantity.min(MAX_LINE_QUANTITY);
                    cart.lines.push(line);
                    if cart.checked_total().is_none() {
                        cart.lines.pop();
                    }
                }
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.product_id == product_id)
    }

    /// Sets the quantity of line `index` unless the cart total would no
    /// longer be computable. Returns whether the change was applied.
    fn try_set(&mut self, index: usize, quantity: u32) -> bool {
        let previous = self.lines[index].quantity;
        self.lines[index].quantity = quantity;
        if self.checked_total().is_none() {
            self.lines[index].quantity = previous;
            return false;
        }
        true
    }

    /// Adds one unit of `product` and returns the line's new quantity. The
    /// cart is unchanged on error.
    pub fn add_item(&mut self, product: &Product) -> Result<u32, CartError> {
        if !product.in_stock {
            return Err(CartError::OutOfStock(product.id.clone()));
        }
        match self.position(&product.id) {
            Some(index) => {
                let quantity = self.lines[index].quantity;
                if quantity >= MAX_LINE_QUANTITY || !self.try_set(index, quantity + 1) {
                    return Err(CartError::LimitReached(product.id.clone()));
                }
                Ok(quantity + 1)
            }
            None => {
                self.lines.push(CartLine::from_product(product));
                if self.checked_total().is_none() {
                    self.lines.pop();
                    return Err(CartError::LimitReached(product.id.clone()));
                }
                Ok(1)
            }
        }
    }

    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        self.lines.len() != before
    }

    /// Applies a signed quantity change, capped at [`MAX_LINE_QUANTITY`]. A
    /// result of zero or less removes the line. Returns the resulting
    /// quantity, or `None` when no line remains.
    pub fn set_quantity(&mut self, product_id: &str, delta: i32) -> Option<u32> {
        let index = self.position(product_id)?;
        let next = i64::from(self.lines[index].quantity) + i64::from(delta);
        if next <= 0 {
            self.lines.remove(index);
            return None;
        }
        let quantity = u32::try_from(next).unwrap_or(u32::MAX).min(MAX_LINE_QUANTITY);
        self.try_set(index, quantity);
        Some(self.lines[index].quantity)
    }

    pub fn compute_line_total(line: &CartLine) -> Decimal {
        line.line_total()
    }

    /// Sum of full-precision line totals, `None` if it does not fit.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.lines
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.checked_line_total()?))
    }

    /// Sum of full-precision line totals. Never rounded here.
    pub fn compute_total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |total, line| total.saturating_add(line.line_total()))
    }

    pub fn compute_item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
