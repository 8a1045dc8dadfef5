/// Custom actions for Product entities.
///
/// These go beyond field patches: they are the operations the admin
/// dashboard exposes as single toggles.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the stock flag without modifying it.
    CheckAvailability,
    /// Marks the product as in or out of stock.
    SetInStock(bool),
    /// Sets the discount percentage.
    ///
    /// # Errors
    /// Fails for percentages above 100.
    SetPromotion(u8),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckAvailability(bool),
    SetInStock(()),
    SetPromotion(()),
}
